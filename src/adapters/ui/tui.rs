//! Implements InputPort. Inquire-based interactive form.
//!
//! Form -> result panel -> spinner while advice loads -> advice panel -> "again?".

use super::render::{render_advice, render_result};
use crate::domain::{DomainError, FormInput, Gender};
use crate::ports::InputPort;
use crate::usecases::CalculatorService;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, CustomType, Select, Text};
use std::time::Duration;
use tracing::debug;

const DEFAULT_AGE: u32 = 25;

/// Applies the pastel theme to all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("✿").with_fg(Color::LightMagenta))
        .with_highlighted_option_prefix(Styled::new("➜").with_fg(Color::LightMagenta));
    inquire::set_global_render_config(config);
}

/// `Ok(None)` when the user cancelled (Esc / Ctrl-C).
fn cancellable<T>(res: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// TUI adapter. Owns the calculator and drives it from inquire prompts.
pub struct TuiInputPort {
    calculator: CalculatorService,
}

impl TuiInputPort {
    pub fn new(calculator: CalculatorService) -> Self {
        Self { calculator }
    }

    /// Prompt the four form fields, pre-filled with the previous round's values.
    fn prompt_form(last: &FormInput) -> Result<Option<FormInput>, DomainError> {
        let Some(age) = cancellable(
            CustomType::<u32>::new("Age (years):")
                .with_default(last.age)
                .with_error_message("Please type a whole number")
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        let start = Gender::ALL
            .iter()
            .position(|g| *g == last.gender)
            .unwrap_or(0);
        let Some(gender) = cancellable(
            Select::new("Gender:", Gender::ALL.to_vec())
                .with_starting_cursor(start)
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        let Some(weight) = cancellable(
            Text::new("Weight (kg):")
                .with_placeholder("e.g. 55")
                .with_initial_value(&last.weight)
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        let Some(height) = cancellable(
            Text::new("Height (cm):")
                .with_placeholder("e.g. 165")
                .with_initial_value(&last.height)
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        Ok(Some(FormInput {
            weight,
            height,
            age,
            gender,
        }))
    }

    fn spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.magenta} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Asking the AI health coach for advice...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Show the spinner until every outstanding advice request has resolved.
    async fn wait_for_advice(&mut self) {
        if !self.calculator.state().is_loading() {
            return;
        }
        let pb = Self::spinner();
        while self.calculator.next_event().await {
            debug!(pending = self.calculator.state().pending, "advice event applied");
        }
        pb.finish_and_clear();
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&mut self) -> Result<(), DomainError> {
        let mut last = FormInput {
            weight: String::new(),
            height: String::new(),
            age: DEFAULT_AGE,
            gender: Gender::Female,
        };

        loop {
            let Some(input) = Self::prompt_form(&last)? else {
                break;
            };
            last = input.clone();

            if !self.calculator.calculate(input) {
                // Invalid weight/height: nothing to show, back to the form.
                continue;
            }

            if let Some(result) = &self.calculator.state().result {
                println!("{}", render_result(result));
            }

            self.wait_for_advice().await;

            if let Some(advice) = &self.calculator.state().advice {
                println!("{}", render_advice(advice));
            }

            let again = cancellable(
                Confirm::new("Calculate again?")
                    .with_default(true)
                    .prompt(),
            )?;
            if again != Some(true) {
                break;
            }
        }

        println!("\n{}", super::banner::footer());
        Ok(())
    }
}
