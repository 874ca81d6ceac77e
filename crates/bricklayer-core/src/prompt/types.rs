/// A yes/no confirmation prompt.
pub struct YesNoPrompt {
    pub question: String,
    /// true = default yes [Y/n], false = default no [y/N]
    pub default: bool,
}

/// Free text input.
pub struct TextPrompt {
    pub question: String,
    pub default: Option<String>,
}

/// Review a list of items and confirm.
pub struct ConfirmListPrompt {
    pub header: String,
    pub items: Vec<String>,
    pub confirm_question: String,
    pub default: bool,
}
