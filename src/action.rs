//! The action to take once every condition for it is met,
//! and the parser that validates an `(Action, ActionCommand)` pair read from the configuration file.
//!
//! Executing the action is not handled here.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::Serialize;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    Shutdown,

    /// Suspend to RAM.
    Sleep,

    /// Suspend to disk.
    Hibernate,

    /// Run the user-supplied `ActionCommand`.
    Other,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Shutdown,
        Action::Sleep,
        Action::Hibernate,
        Action::Other,
    ];

    /// The name used in the configuration file.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Shutdown => "Shutdown",
            Action::Sleep => "Sleep",
            Action::Hibernate => "Hibernate",
            Action::Other => "Other",
        }
    }

    /// The hard-coded command run for this action when no `ActionCommand` is configured.
    /// [`Action::Other`] has none.
    pub fn builtin_command(&self) -> Option<&'static str> {
        match self {
            Action::Shutdown => Some("systemctl poweroff"),
            Action::Sleep => Some("systemctl suspend"),
            Action::Hibernate => Some("systemctl hibernate"),
            Action::Other => None,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedActionError;

impl FromStr for Action {
    type Err = UnrecognizedActionError;

    /// Action names are matched case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Action::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(value))
            .ok_or(UnrecognizedActionError)
    }
}



/// Why an `(Action, ActionCommand)` pair was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionParseError {
    /// The action name is not one of the known actions.
    NotRecognized,

    /// [`Action::Other`] was requested without a command to run.
    MissingCommand(Action),
}


/// Validate an action name together with its (optional) command.
///
/// On success, returns the typed action alongside the command exactly as configured;
/// use [`Action::builtin_command`] to fill in a missing command for built-in actions.
pub fn parse_action(
    action_name: &str,
    action_command: Option<&str>,
) -> Result<(Action, Option<String>), ActionParseError> {
    let action = action_name
        .parse::<Action>()
        .map_err(|_| ActionParseError::NotRecognized)?;

    let action_command = action_command
        .map(str::trim)
        .filter(|command| !command.is_empty())
        .map(str::to_string);

    if action == Action::Other && action_command.is_none() {
        return Err(ActionParseError::MissingCommand(action));
    }

    Ok((action, action_command))
}
