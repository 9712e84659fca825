//! Commands typed at the interactive prompt.

use vidsave_core::category::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCommand {
    /// Save the current entry under this category.
    Save(Category),
    List,
    Status,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

impl PromptCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let word = line.trim();
        let cmd = match word.to_ascii_lowercase().as_str() {
            "" => PromptCommand::Nothing,
            "list" | "ls" => PromptCommand::List,
            "status" => PromptCommand::Status,
            "help" | "?" => PromptCommand::Help,
            "quit" | "q" | "exit" => PromptCommand::Quit,
            _ => PromptCommand::Save(word.parse::<Category>().map_err(|e| e.to_string())?),
        };
        Ok(cmd)
    }
}

pub fn help_text() -> String {
    let mut out = String::from("Save the current video as:\n");
    for (i, c) in Category::ALL.iter().enumerate() {
        out.push_str(&format!("  {}  {:<6} {} -> {}/\n", i + 1, c.name(), c.label(), c.folder()));
    }
    out.push_str("Other commands: list, status, help, quit");
    out
}
