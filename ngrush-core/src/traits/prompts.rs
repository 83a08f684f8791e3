//! Prompt source
//!
//! Prompts are short letter sequences shown for a whole round. The pools
//! themselves are loaded by the launcher and lent to the core read-only.

use heapless::String;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::config::{ConfigError, MAX_PROMPT_LEN};
use crate::game::PromptClass;

/// A round's prompt
pub type Prompt = String<MAX_PROMPT_LEN>;

/// Trait for drawing a prompt of a given class
pub trait PromptSource {
    /// Draw one prompt, or `None` if the class has nothing to offer
    fn draw(&mut self, class: PromptClass) -> Option<Prompt>;
}

impl<T: PromptSource + ?Sized> PromptSource for &mut T {
    fn draw(&mut self, class: PromptClass) -> Option<Prompt> {
        (**self).draw(class)
    }
}

/// Easy and hard pools with uniform random selection
pub struct PromptPools<'a, S, R> {
    easy: &'a [S],
    hard: &'a [S],
    rng: R,
}

impl<'a, S: AsRef<str>, R: RngCore> PromptPools<'a, S, R> {
    /// Build pools, rejecting empty pools and prompts that do not fit a `Prompt`
    pub fn new(easy: &'a [S], hard: &'a [S], rng: R) -> Result<Self, ConfigError> {
        if easy.is_empty() {
            return Err(ConfigError::EmptyPromptPool(PromptClass::Easy));
        }
        if hard.is_empty() {
            return Err(ConfigError::EmptyPromptPool(PromptClass::Hard));
        }
        if easy
            .iter()
            .chain(hard.iter())
            .any(|p| p.as_ref().len() > MAX_PROMPT_LEN)
        {
            return Err(ConfigError::PromptTooLong);
        }

        Ok(Self { easy, hard, rng })
    }

    /// The pool used for `class`
    pub fn pool(&self, class: PromptClass) -> &'a [S] {
        match class {
            PromptClass::Easy => self.easy,
            PromptClass::Hard => self.hard,
        }
    }
}

impl<'a, S: AsRef<str>, R: RngCore> PromptSource for PromptPools<'a, S, R> {
    fn draw(&mut self, class: PromptClass) -> Option<Prompt> {
        let pool = self.pool(class);
        let pick = pool.choose(&mut self.rng)?;

        let mut prompt = Prompt::new();
        prompt.push_str(pick.as_ref()).ok()?;
        Some(prompt)
    }
}
