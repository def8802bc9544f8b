use crate::{
    action::{parse_action, Action, ActionParseError},
    configuration::{errors::ConfigurationFault, traits::ResolvableConfiguration},
};


/// The raw `Action` / `ActionCommand` pair as read from the file.
/// Empty strings have the same meaning as absent keys.
pub(crate) struct UnresolvedActionConfiguration {
    pub(crate) action: String,

    pub(crate) action_command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActionConfiguration {
    pub(crate) action: Action,

    pub(crate) action_command: Option<String>,
}


impl UnresolvedActionConfiguration {
    /// `ActionCommand`, with an empty value normalised to unset.
    pub(crate) fn action_command(&self) -> Option<String> {
        let action_command = self.action_command.trim();

        if action_command.is_empty() {
            None
        } else {
            Some(action_command.to_string())
        }
    }
}

impl ResolvableConfiguration for UnresolvedActionConfiguration {
    type Resolved = ActionConfiguration;
    type Error = ConfigurationFault;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        let action_command = self.action_command();
        let action_name = self.action.trim();

        if action_name.is_empty() {
            return Err(ConfigurationFault::NoAction);
        }

        match parse_action(action_name, action_command.as_deref()) {
            Ok((action, action_command)) => Ok(ActionConfiguration {
                action,
                action_command,
            }),
            Err(ActionParseError::NotRecognized) => Err(ConfigurationFault::InvalidAction {
                value: action_name.to_string(),
            }),
            Err(ActionParseError::MissingCommand(action)) => {
                Err(ConfigurationFault::MissingActionCommand { action })
            }
        }
    }
}
