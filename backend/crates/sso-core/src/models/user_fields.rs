use crate::UserField;

use std::collections::HashMap;

/// A partial view of one user record.
///
/// Empty values are never stored: a field is either present with content or
/// absent, which is what the "fill if empty" profile rules key on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    values: HashMap<UserField, String>,
}

impl UserFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: UserField, value: Option<String>) {
        match value {
            Some(v) if !v.is_empty() => {
                self.values.insert(field, v);
            }
            _ => {
                self.values.remove(&field);
            }
        }
    }

    pub fn get(&self, field: UserField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn has(&self, field: UserField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(UserField, Option<String>)> for UserFields {
    fn from_iter<I: IntoIterator<Item = (UserField, Option<String>)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (field, value) in iter {
            fields.insert(field, value);
        }
        fields
    }
}
