//! Numbered operation menu.
//!
//! Topics register a label + mode pair; [`Menu::show`] renders the list,
//! reads a single numeric choice, and falls back to the first registered
//! option on empty or invalid input.

use crate::config::OperationMode;
use crate::error::Result;
use crate::prompts::{ask, print_section};

pub struct MenuOption {
    pub label: String,
    pub mode: OperationMode,
}

pub struct Menu {
    title: String,
    options: Vec<MenuOption>,
}

impl Menu {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            options: Vec::new(),
        }
    }

    pub fn add_option(&mut self, label: &str, mode: OperationMode) {
        self.options.push(MenuOption {
            label: label.to_string(),
            mode,
        });
    }

    /// Render the menu and read the operator's choice.
    pub fn show(&self) -> Result<OperationMode> {
        print_section(&self.title);
        for (i, opt) in self.options.iter().enumerate() {
            println!("{}. {}", i + 1, opt.label);
        }

        let choice = ask(&format!("Select option [1-{}]", self.options.len()), Some("1"))?;
        let mode = self.select(&choice);
        println!("Selected: {}\n", mode.label());
        Ok(mode)
    }

    /// Map raw input to a registered mode, defaulting to the first option.
    pub fn select(&self, choice: &str) -> OperationMode {
        match choice.trim().parse::<usize>() {
            Ok(n) if (1..=self.options.len()).contains(&n) => self.options[n - 1].mode,
            _ => self
                .options
                .first()
                .map(|o| o.mode)
                .unwrap_or(OperationMode::FullSetup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Menu {
        let mut menu = Menu::new("Select Operation");
        menu.add_option("Full Setup", OperationMode::FullSetup);
        menu.add_option("mTLS Identity Only", OperationMode::MtlsOnly);
        menu.add_option("Apple Profile Only", OperationMode::AppleProfileOnly);
        menu.add_option("Portal Configuration Only", OperationMode::PortalOnly);
        menu.add_option("GitHub SSH Onboarding", OperationMode::GithubSsh);
        menu
    }

    #[test]
    fn numeric_choice_selects_option() {
        let menu = fixture();
        assert_eq!(menu.select("2"), OperationMode::MtlsOnly);
        assert_eq!(menu.select(" 5 "), OperationMode::GithubSsh);
    }

    #[test]
    fn invalid_input_falls_back_to_default() {
        let menu = fixture();
        assert_eq!(menu.select(""), OperationMode::FullSetup);
        assert_eq!(menu.select("0"), OperationMode::FullSetup);
        assert_eq!(menu.select("99"), OperationMode::FullSetup);
        assert_eq!(menu.select("portal"), OperationMode::FullSetup);
    }
}
