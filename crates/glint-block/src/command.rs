//! Names of the commands and attributes a block forwards.
//!
//! Blocks must implement `load`, `edit` and `save`; `cancel`, `hasChanged`
//! and `isValid` are optional.

use std::fmt;

/// A named command, wrapped with `pre-`/`post-` events and error fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Load,
    Edit,
    Save,
    Cancel,
    HasChanged,
    IsValid,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Load,
        Command::Edit,
        Command::Save,
        Command::Cancel,
        Command::HasChanged,
        Command::IsValid,
    ];

    /// The member name forwarded to the delegate.
    pub fn name(self) -> &'static str {
        match self {
            Command::Load => "load",
            Command::Edit => "edit",
            Command::Save => "save",
            Command::Cancel => "cancel",
            Command::HasChanged => "hasChanged",
            Command::IsValid => "isValid",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Event emitted before the command is forwarded, e.g. `pre-load`.
    pub fn pre_event(self) -> String {
        format!("pre-{}", self.name())
    }

    /// Event emitted after the command was forwarded, e.g. `post-load`.
    pub fn post_event(self) -> String {
        format!("post-{}", self.name())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A block attribute with a get/set accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Id,
    Selector,
    El,
    Place,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Id,
        Attribute::Selector,
        Attribute::El,
        Attribute::Place,
    ];

    /// The member name forwarded to the delegate, also the event name.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Id => "id",
            Attribute::Selector => "selector",
            Attribute::El => "el",
            Attribute::Place => "place",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        let names: Vec<&str> = Command::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec!["load", "edit", "save", "cancel", "hasChanged", "isValid"]
        );
        for cmd in Command::ALL {
            assert_eq!(Command::from_name(cmd.name()), Some(cmd));
        }
        assert_eq!(Command::from_name("has_changed"), None);
    }

    #[test]
    fn test_command_events() {
        assert_eq!(Command::HasChanged.pre_event(), "pre-hasChanged");
        assert_eq!(Command::Save.post_event(), "post-save");
    }

    #[test]
    fn test_attribute_names() {
        for attr in Attribute::ALL {
            assert_eq!(Attribute::from_name(attr.name()), Some(attr));
        }
        assert_eq!(Attribute::Selector.to_string(), "selector");
        assert_eq!(Attribute::from_name("load"), None);
    }
}
