use blueprint_asset::{Decision, DialogService, SuppressibleRequest};

use crate::settings::SettingsStore;

/// Warning id for the "new parent already implements these interfaces"
/// dialog. Stable: the user's suppression is stored under it.
pub const WARNING_COMMON_INTERFACES: &str = "Warning_CommonInterfacesWhileReparenting";

/// A warning dialog the user can permanently silence. When its id is already
/// suppressed, the confirming choice is returned without showing anything.
pub struct SuppressibleWarning<'a> {
    pub warning_id: &'a str,
    pub title: &'a str,
    pub message: String,
    pub confirm_label: &'a str,
    pub cancel_label: &'a str,
}

impl SuppressibleWarning<'_> {
    pub fn show(&self, dialogs: &dyn DialogService, settings: &SettingsStore) -> Decision {
        if settings.is_warning_suppressed(self.warning_id) {
            return Decision::Confirm;
        }
        let choice = dialogs.confirm_suppressible(&SuppressibleRequest {
            warning_id: self.warning_id,
            title: self.title,
            message: self.message.clone(),
            confirm_label: self.confirm_label,
            cancel_label: self.cancel_label,
        });
        // "Don't ask again" only sticks together with a confirming answer;
        // a cancelled dialog must keep appearing.
        if choice.suppress_in_future && choice.decision == Decision::Confirm {
            settings.suppress_warning(self.warning_id);
        }
        choice.decision
    }
}
