// End-to-end tests for the voicebox core.
//
// Each test builds its own TestContext: a fresh temp directory holding the
// cache root and the user registry, wired to an in-process generator double.
// Nothing is shared between tests, so they run in parallel without
// conflicts and never touch the network or the audio device.

mod helpers;
mod test_cache;
mod test_speak;
mod test_users;
