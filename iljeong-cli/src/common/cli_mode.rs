/// Whether a mode handled the invocation or the next one should try.
#[derive(Debug, PartialEq, Eq)]
pub enum CliModeResult {
    Finish,
    NothingToDo,
}
