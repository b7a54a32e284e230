/*!
The [`Registry`] owns every registered parameter and knows how to find them:
by name, by `--longname`, by `-s` shortname, and by registration order.
*/

use std::collections::HashMap;

use crate::errors::{Error, RegistrationError};
use crate::parameter::{
    AnyNamed, AnyPositional, Flag, Kind, NamedValue, Parameter, PositionalValue, Scalar,
    is_valid_longname, is_valid_shortname,
};

/**
Owned storage for a set of parameters.

Parameters live in an index-addressed slot store; everything else (names,
longnames, shortnames, and the ordered flag, option, and positional lists) is
an index into it. Names, longnames, and shortnames are each unique.
*/
#[derive(Debug, Clone)]
pub struct Registry {
    slots: Vec<Parameter>,
    names: HashMap<String, usize>,
    longnames: HashMap<String, usize>,
    shortnames: HashMap<u8, usize>,
    flags: Vec<usize>,
    options: Vec<usize>,
    positionals: Vec<usize>,
    autohelp: bool,
    sealed: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            names: HashMap::new(),
            longnames: HashMap::new(),
            shortnames: HashMap::new(),
            flags: Vec::new(),
            options: Vec::new(),
            positionals: Vec::new(),
            autohelp: true,
            sealed: false,
        }
    }

    /**
    Register a parameter, taking ownership of it.

    Fails if parsing already began, if the name is taken, or if the parameter
    has a longname or shortname that is invalid or taken. Registering a
    required positional turns off autohelp.
    */
    pub fn add(&mut self, parameter: impl Kind) -> Result<&mut Self, RegistrationError> {
        let parameter = parameter.into_parameter();
        let name = parameter.name();

        if self.sealed {
            return Err(RegistrationError::AfterParse {
                name: name.to_owned(),
            });
        }

        if self.names.contains_key(name) {
            return Err(RegistrationError::DuplicateName {
                name: name.to_owned(),
            });
        }

        if let Some(naming) = parameter.naming() {
            let longname = naming.longname();

            if !is_valid_longname(longname) {
                return Err(RegistrationError::InvalidLongname {
                    name: name.to_owned(),
                    longname: longname.to_owned(),
                });
            }

            if let Some(&existing) = self.longnames.get(longname) {
                return Err(RegistrationError::DuplicateLongname {
                    name: name.to_owned(),
                    longname: longname.to_owned(),
                    existing: self.slots[existing].name().to_owned(),
                });
            }

            if let Some(shortname) = naming.shortname() {
                if !is_valid_shortname(shortname) {
                    return Err(RegistrationError::InvalidShortname {
                        name: name.to_owned(),
                        shortname,
                    });
                }

                if let Some(&existing) = self.shortnames.get(&(shortname as u8)) {
                    return Err(RegistrationError::DuplicateShortname {
                        name: name.to_owned(),
                        shortname,
                        existing: self.slots[existing].name().to_owned(),
                    });
                }
            }
        }

        let index = self.slots.len();

        if let Some(naming) = parameter.naming() {
            self.longnames.insert(naming.longname().to_owned(), index);

            if let Some(shortname) = naming.shortname() {
                self.shortnames.insert(shortname as u8, index);
            }
        }

        match parameter {
            Parameter::Flag(_) => self.flags.push(index),
            Parameter::Named(_) => self.options.push(index),
            Parameter::Positional(ref positional) => {
                self.positionals.push(index);

                if self.autohelp && !positional.is_optional() {
                    log::debug!(
                        "required positional `{}` disables autohelp",
                        positional.identity().name()
                    );
                    self.autohelp = false;
                }
            }
        }

        log::debug!("registered `{}` as {}", parameter.name(), parameter.describe());

        self.names.insert(parameter.name().to_owned(), index);
        self.slots.push(parameter);

        Ok(self)
    }

    /// Look up a parameter by name, narrowed to the kind `P`.
    pub fn get<P: Kind>(&self, name: &str) -> Result<&P, Error> {
        let parameter = self.find(name).ok_or_else(|| Error::Unregistered {
            name: name.to_owned(),
        })?;

        P::narrow(parameter).ok_or_else(|| Error::InternalInvariant {
            name: name.to_owned(),
            expected: P::describe(),
        })
    }

    pub fn get_flag(&self, name: &str) -> Result<&Flag, Error> {
        self.get(name)
    }

    pub fn get_named<T: Scalar>(&self, name: &str) -> Result<&NamedValue<T>, Error> {
        self.get(name)
    }

    pub fn get_positional<T: Scalar>(&self, name: &str) -> Result<&PositionalValue<T>, Error> {
        self.get(name)
    }

    /// Look up a parameter of any kind by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Parameter> {
        self.names.get(name).map(|&index| &self.slots[index])
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// True if help should be printed when there are no arguments
    #[inline]
    #[must_use]
    pub fn autohelp(&self) -> bool {
        self.autohelp
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every parameter, in registration order
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.slots.iter()
    }

    /// All flags, in registration order
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags
            .iter()
            .filter_map(|&index| match self.slots[index] {
                Parameter::Flag(ref flag) => Some(flag),
                _ => None,
            })
    }

    /// All named values, in registration order
    pub fn options(&self) -> impl Iterator<Item = &AnyNamed> {
        self.options
            .iter()
            .filter_map(|&index| match self.slots[index] {
                Parameter::Named(ref named) => Some(named),
                _ => None,
            })
    }

    /// All positionals, in registration order
    pub fn positionals(&self) -> impl Iterator<Item = &AnyPositional> {
        self.positionals
            .iter()
            .filter_map(|&index| match self.slots[index] {
                Parameter::Positional(ref positional) => Some(positional),
                _ => None,
            })
    }

    /// Refuse any further registrations
    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }

    #[inline]
    pub(crate) fn is_sealed(&self) -> bool {
        self.sealed
    }

    #[inline]
    pub(crate) fn lookup_long(&self, longname: &str) -> Option<usize> {
        self.longnames.get(longname).copied()
    }

    #[inline]
    pub(crate) fn lookup_short(&self, shortname: u8) -> Option<usize> {
        self.shortnames.get(&shortname).copied()
    }

    /// The positional at `cursor`, counting in registration order
    pub(crate) fn positional_mut(&mut self, cursor: usize) -> Option<&mut AnyPositional> {
        let index = *self.positionals.get(cursor)?;

        match self.slots[index] {
            Parameter::Positional(ref mut positional) => Some(positional),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Parameter {
        &mut self.slots[index]
    }

    #[cfg(test)]
    fn slot(&self, index: usize) -> &Parameter {
        &self.slots[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new();

        registry
            .add(Flag::new("flag").shortname('f'))
            .unwrap()
            .add(NamedValue::<i64>::new("num").shortname('n'))
            .unwrap()
            .add(PositionalValue::<String>::new("pos").optional(true))
            .unwrap();

        registry
    }

    #[test]
    fn lookups() {
        let registry = registry();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get_flag("flag").unwrap().name(), "flag");
        assert_eq!(registry.get_named::<i64>("num").unwrap().count(), 0);
        assert_eq!(registry.get_positional::<String>("pos").unwrap().get(), "");

        assert_eq!(
            registry.lookup_long("num").map(|index| registry.slot(index).name()),
            Some("num")
        );
        assert_eq!(
            registry.lookup_short(b'f').map(|index| registry.slot(index).name()),
            Some("flag")
        );
        assert_eq!(registry.lookup_long("pos"), None);
    }

    #[test]
    fn ordered_lists() {
        let mut registry = registry();
        registry
            .add(Flag::new("second"))
            .unwrap()
            .add(PositionalValue::<f64>::new("delay"))
            .unwrap();

        let flags: Vec<&str> = registry.flags().map(|flag| flag.name()).collect();
        assert_eq!(flags, ["flag", "second"]);

        let options: Vec<&str> = registry
            .options()
            .map(|named| named.identity().name())
            .collect();
        assert_eq!(options, ["num"]);

        let positionals: Vec<&str> = registry
            .positionals()
            .map(|positional| positional.identity().name())
            .collect();
        assert_eq!(positionals, ["pos", "delay"]);

        let all: Vec<&str> = registry.parameters().map(|p| p.name()).collect();
        assert_eq!(all, ["flag", "num", "pos", "second", "delay"]);
    }

    #[test]
    fn collisions_leave_the_registry_intact() {
        let mut registry = registry();

        assert_eq!(
            registry.add(Flag::new("flag")).unwrap_err(),
            RegistrationError::DuplicateName {
                name: "flag".to_owned()
            }
        );
        assert_eq!(
            registry
                .add(NamedValue::<f64>::new("other").shortname('n'))
                .unwrap_err(),
            RegistrationError::DuplicateShortname {
                name: "other".to_owned(),
                shortname: 'n',
                existing: "num".to_owned(),
            }
        );
        assert_eq!(
            registry.add(Flag::new("other").longname("num")).unwrap_err(),
            RegistrationError::DuplicateLongname {
                name: "other".to_owned(),
                longname: "num".to_owned(),
                existing: "num".to_owned(),
            }
        );

        assert_eq!(registry.len(), 3);
        assert!(!registry.contains("other"));
        assert!(registry.get_named::<i64>("num").is_ok());
        assert_eq!(
            registry.lookup_short(b'n').map(|index| registry.slot(index).name()),
            Some("num")
        );
        assert_eq!(registry.flags().count(), 1);
        assert_eq!(registry.options().count(), 1);
    }

    #[test]
    fn positionals_do_not_claim_names_on_the_command_line() {
        let mut registry = registry();

        // A positional's name is not a longname, so an option may reuse it
        registry
            .add(Flag::new("other").longname("pos"))
            .unwrap();
        assert!(registry.lookup_long("pos").is_some());
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut registry = Registry::new();

        assert_eq!(
            registry.add(Flag::new("dry run")).unwrap_err(),
            RegistrationError::InvalidLongname {
                name: "dry run".to_owned(),
                longname: "dry run".to_owned(),
            }
        );
        assert!(registry.add(Flag::new("dry run").longname("dry-run")).is_ok());
        assert_eq!(
            registry.add(Flag::new("x").shortname('?')).unwrap_err(),
            RegistrationError::InvalidShortname {
                name: "x".to_owned(),
                shortname: '?',
            }
        );

        // Positionals have no longname to validate
        assert!(registry.add(PositionalValue::<String>::new("my file")).is_ok());
    }

    #[test]
    fn autohelp_is_disabled_by_required_positionals() {
        let mut registry = registry();
        assert!(registry.autohelp());

        registry.add(PositionalValue::<f64>::new("delay")).unwrap();
        assert!(!registry.autohelp());
    }

    #[test]
    fn wrong_kind_is_an_internal_error() {
        let registry = registry();

        assert_eq!(
            registry.get_flag("num").unwrap_err(),
            Error::InternalInvariant {
                name: "num".to_owned(),
                expected: "a `Flag`".to_owned(),
            }
        );
        assert_eq!(
            registry.get_named::<String>("num").unwrap_err().status(),
            2
        );
        assert_eq!(
            registry.get_flag("missing").unwrap_err(),
            Error::Unregistered {
                name: "missing".to_owned()
            }
        );
    }

    #[test]
    fn sealed_registry_rejects_additions() {
        let mut registry = registry();
        registry.seal();

        assert!(registry.is_sealed());
        assert_eq!(
            registry.add(Flag::new("late")).unwrap_err(),
            RegistrationError::AfterParse {
                name: "late".to_owned()
            }
        );
    }
}
