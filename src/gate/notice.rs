use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Fatal,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    /// Stable identity of the gated mod that raised it.
    pub owner: String,
}

/// Where a gate sends its notices.
pub trait NotificationPresenter {
    /// Replaces whatever notice was live before.
    fn show(&mut self, notice: Notice);

    /// Removes the live notice, if any.
    fn clear(&mut self);

    /// The player closed the notice. Gating is unaffected.
    fn dismiss(&mut self);
}

/// Per-mod presenter component read by the notice UI.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct NoticeSlot {
    notice: Option<Notice>,
    dismissed: bool,
}

impl NoticeSlot {
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// A notice is live and the player has not closed it.
    pub fn is_presenting(&self) -> bool {
        self.notice.is_some() && !self.dismissed
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }
}

impl NotificationPresenter for NoticeSlot {
    fn show(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.dismissed = false;
    }

    fn clear(&mut self) {
        self.notice = None;
        self.dismissed = false;
    }

    fn dismiss(&mut self) {
        if self.notice.is_some() {
            self.dismissed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(message: &str) -> Notice {
        Notice {
            title: "[ModA] Waiting".into(),
            message: message.into(),
            severity: Severity::Warning,
            owner: "ModA".into(),
        }
    }

    #[test]
    fn latest_notice_replaces_previous() {
        let mut slot = NoticeSlot::default();
        slot.show(warning("first"));
        slot.show(warning("second"));

        assert_eq!(slot.notice().map(|it| it.message.as_str()), Some("second"));
    }

    #[test]
    fn dismissal_hides_without_dropping_the_notice() {
        let mut slot = NoticeSlot::default();
        slot.show(warning("Lib1"));
        slot.dismiss();

        assert!(!slot.is_presenting());
        assert!(slot.notice().is_some());

        slot.clear();
        assert!(slot.notice().is_none());
        assert!(!slot.is_dismissed());
    }

    #[test]
    fn dismissing_an_empty_slot_does_nothing() {
        let mut slot = NoticeSlot::default();
        slot.dismiss();
        assert!(!slot.is_dismissed());
    }
}
