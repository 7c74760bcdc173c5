//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("service.name must not be empty")]
    MissingServiceName,
    #[error("binding #{0}: channel must not be empty")]
    MissingChannel(usize),
    #[error("binding #{index} ({channel}): project must not be empty")]
    MissingProject { index: usize, channel: String },
    #[error("binding #{index} ({channel}): admin must not be empty")]
    MissingAdmin { index: usize, channel: String },
    #[error("binding #{index}: channel '{channel}' is already bound by an earlier binding")]
    DuplicateChannel { index: usize, channel: String },
    #[error("binding #{index} ({channel}): '{member}' is listed as both admin and member")]
    ConflictingRole {
        index: usize,
        channel: String,
        member: String,
    },
}

/// Validate a configuration, returning all errors found.
///
/// Binding indexes in errors are 1-based, matching their order in the file.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service.name.trim().is_empty() {
        errors.push(ValidationError::MissingServiceName);
    }

    let mut seen = HashSet::new();
    for (i, binding) in config.bindings.iter().enumerate() {
        let index = i + 1;
        let channel = binding.channel.clone();

        if binding.channel.is_empty() {
            errors.push(ValidationError::MissingChannel(index));
        } else if !seen.insert(binding.channel.as_str()) {
            errors.push(ValidationError::DuplicateChannel {
                index,
                channel: channel.clone(),
            });
        }
        if binding.project.is_empty() {
            errors.push(ValidationError::MissingProject {
                index,
                channel: channel.clone(),
            });
        }
        if binding.admin.is_empty() {
            errors.push(ValidationError::MissingAdmin {
                index,
                channel: channel.clone(),
            });
        }

        for member in &binding.members {
            if binding.admins.contains(member) || *member == binding.admin {
                errors.push(ValidationError::ConflictingRole {
                    index,
                    channel: channel.clone(),
                    member: member.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
