use crate::error::PromptError;

/// The two blocking primitives the input engine needs from a terminal front end.
///
/// Implementations decide how to render and edit the line; the engine only
/// sees the returned text. Operator aborts and closed input streams must be
/// reported as [`PromptError::Cancelled`], never as an empty string.
pub trait Prompt {
    /// Asks for one line of free text.
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Asks the operator to pick one of `choices`. Implementations may accept
    /// free text; the engine validates whatever comes back.
    fn read_selection(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        (**self).read_line(prompt)
    }

    fn read_selection(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError> {
        (**self).read_selection(prompt, choices)
    }
}

impl<P: Prompt + ?Sized> Prompt for Box<P> {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        (**self).read_line(prompt)
    }

    fn read_selection(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError> {
        (**self).read_selection(prompt, choices)
    }
}
