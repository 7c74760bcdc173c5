//! Startup seeding of channel bindings from configuration.
//!
//! Seeds go through [`ChannelActions`] like any other caller, so they obey
//! the same rules: the binding's `admin` registers the channel and then adds
//! the listed admins and members.

use crate::actions::ChannelActions;
use crate::config::BindingSeed;
use crate::error::ActionError;
use crate::telemetry::spans;
use tracing::{Instrument, info, warn};

/// What seeding did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Bindings registered or rebound.
    pub bindings: usize,
    /// Memberships created.
    pub members_added: usize,
    /// Steps rejected with a recoverable error and skipped.
    pub skipped: usize,
}

/// Apply every binding in order.
///
/// Recoverable rejections (an admin listed twice, a channel already owned
/// by someone else) are logged and skipped. Registry failures abort.
pub async fn apply_bindings(
    actions: &ChannelActions,
    bindings: &[BindingSeed],
) -> Result<SeedReport, ActionError> {
    let mut report = SeedReport::default();

    for binding in bindings {
        apply_binding(actions, binding, &mut report)
            .instrument(spans::seed(&binding.channel))
            .await?;
    }

    info!(
        bindings = report.bindings,
        members = report.members_added,
        skipped = report.skipped,
        "Seed bindings applied"
    );
    Ok(report)
}

async fn apply_binding(
    actions: &ChannelActions,
    binding: &BindingSeed,
    report: &mut SeedReport,
) -> Result<(), ActionError> {
    let registered = actions
        .register_project(
            &binding.channel,
            &binding.project,
            binding.restricted,
            &binding.admin,
        )
        .await;
    if skip_recoverable(registered, report)?.is_none() {
        // Without the registration there is no admin to add anyone.
        return Ok(());
    }
    report.bindings += 1;

    let wanted = binding
        .admins
        .iter()
        .map(|m| (m, true))
        .chain(binding.members.iter().map(|m| (m, false)));

    for (member, make_admin) in wanted {
        let added = actions
            .add_member(&binding.channel, &binding.admin, member, make_admin)
            .await;
        if skip_recoverable(added, report)?.is_some() {
            report.members_added += 1;
        }
    }
    Ok(())
}

/// Pass through successes, count and swallow recoverable errors.
fn skip_recoverable<T>(
    result: Result<T, ActionError>,
    report: &mut SeedReport,
) -> Result<Option<T>, ActionError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "Seed step skipped");
            report.skipped += 1;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
