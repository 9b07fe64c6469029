//! Engine dispatch macro.

/// Runs `$body` with `$engine` bound to the concrete engine inside an
/// [`AnyEngine`](crate::AnyEngine).
///
/// Expands to a single `match`, so every call site stays statically
/// dispatched per family.
///
/// # Example
/// ```ignore
/// dispatch_engine!(self, engine => engine.rt_note_on(channel, note, velocity))
/// ```
macro_rules! dispatch_engine {
    ($any:expr, $engine:ident => $body:expr) => {
        match $any {
            #[cfg(feature = "soundfont")]
            $crate::AnyEngine::SoundFont($engine) => $body,
            $crate::AnyEngine::Null($engine) => $body,
        }
    };
}
