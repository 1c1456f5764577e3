use crate::api::{SoneId, SoneStatus, Status};

/// What is displayed of a sone's status, the last fetched one
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SoneView {
    pub id: SoneId,
    pub name: String,
    pub status: Status,
    pub modified: bool,
    pub last_updated: String,
}

impl SoneView {
    pub fn new(id: SoneId) -> SoneView {
        SoneView {
            id,
            name: String::new(),
            status: Status::Unknown,
            modified: false,
            last_updated: String::new(),
        }
    }

    pub fn apply(&mut self, s: SoneStatus) {
        self.name = s.name;
        self.status = s.status;
        self.modified = s.modified;
        self.last_updated = s.last_updated;
    }

    /// Every css class the view controls on the sone's elements, along with
    /// whether it should be set
    ///
    /// Exactly one of the status classes is set.
    pub fn class_flags(&self) -> [(&'static str, bool); 5] {
        let [a, b, c, d] = Status::ALL.map(|s| (s.as_str(), s == self.status));
        [a, b, c, d, ("modified", self.modified)]
    }
}

/// Like state of a post or reply
///
/// `None` fields have not been touched since the page was rendered by the
/// server, and are left as-is.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LikeView {
    pub liked: Option<bool>,
    pub likes: Option<u64>,
}

impl LikeView {
    pub fn like_hidden(&self) -> Option<bool> {
        self.liked
    }

    pub fn unlike_hidden(&self) -> Option<bool> {
        self.liked.map(|l| !l)
    }

    pub fn likes_hidden(&self) -> Option<bool> {
        self.likes.map(|n| n == 0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeletePhase {
    /// The delete button itself is shown
    Prompt,

    /// The confirm button is shown instead
    Confirm,

    /// Deletion was confirmed, waiting for the server's answer
    Deleting,

    Removed,
}

/// One-shot "click anywhere else" handler state
///
/// Once armed, fires at most once, then stays disarmed until armed again.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Dismissal {
    armed: bool,
}

impl Dismissal {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns whether the dismissal actually fired
    pub fn fire(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeleteView {
    pub phase: DeletePhase,

    /// Localized text of the confirm button
    pub label: String,

    pub dismissal: Dismissal,
}

impl DeleteView {
    pub fn new(label: String) -> DeleteView {
        DeleteView {
            phase: DeletePhase::Prompt,
            label,
            dismissal: Dismissal::default(),
        }
    }

    pub fn prompt_visible(&self) -> bool {
        self.phase == DeletePhase::Prompt
    }

    pub fn confirm_visible(&self) -> bool {
        self.phase == DeletePhase::Confirm
    }

    /// Returns whether the confirm button got shown
    pub fn ask_confirmation(&mut self) -> bool {
        if self.phase != DeletePhase::Prompt {
            return false;
        }
        self.phase = DeletePhase::Confirm;
        self.dismissal.arm();
        true
    }

    /// Returns whether the prompt got shown again
    pub fn dismiss(&mut self) -> bool {
        if !self.dismissal.fire() || self.phase != DeletePhase::Confirm {
            return false;
        }
        self.phase = DeletePhase::Prompt;
        true
    }

    /// Returns whether deletion should proceed
    pub fn confirm(&mut self) -> bool {
        if self.phase != DeletePhase::Confirm {
            return false;
        }
        self.dismissal.disarm();
        self.phase = DeletePhase::Deleting;
        true
    }
}

/// State of the "create reply" form of a post
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReplyFormView {
    pub hidden: bool,

    /// Dimmed, as the reply input only holds its default text
    pub light: bool,
}
