use crate::models::{MenuKey, UserType};

/// The one overlay or screen currently shown by the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Hub,
    Swipe(UserType),
    Coach,
    Messages,
    Dashboard,
    AddJob,
    Verify,
    /// Flipped detail card (profile, company, settings).
    Detail(MenuKey),
}

impl ActiveView {
    pub fn title(&self) -> &'static str {
        match self {
            ActiveView::Hub => "Menu",
            ActiveView::Swipe(UserType::Candidate) => "Jobs",
            ActiveView::Swipe(UserType::Employer) => "Candidates",
            ActiveView::Coach => "Coach",
            ActiveView::Messages => "Messages",
            ActiveView::Dashboard => "Dashboard",
            ActiveView::AddJob => "Upload Jobs",
            ActiveView::Verify => "Verify",
            ActiveView::Detail(MenuKey::Profile) => "Profile",
            ActiveView::Detail(MenuKey::Company) => "Company",
            ActiveView::Detail(_) => "Settings",
        }
    }
}

/// Where a tap on a hub card leads. `None` means the action is not
/// available to this user type.
pub fn view_for(key: MenuKey, user_type: UserType) -> Option<ActiveView> {
    match key {
        MenuKey::Jobs => Some(ActiveView::Swipe(UserType::Candidate)),
        MenuKey::Candidates => Some(ActiveView::Swipe(UserType::Employer)),
        MenuKey::Coach => Some(ActiveView::Coach),
        MenuKey::Messages => Some(ActiveView::Messages),
        MenuKey::Dashboard if user_type == UserType::Employer => Some(ActiveView::Dashboard),
        MenuKey::Dashboard => None,
        MenuKey::Verify => Some(ActiveView::Verify),
        MenuKey::Settings | MenuKey::Profile | MenuKey::Company => Some(ActiveView::Detail(key)),
        MenuKey::UploadJobs => Some(ActiveView::AddJob),
    }
}

/// Current view plus the views to return to.
#[derive(Debug, Clone)]
pub struct ViewStack {
    history: Vec<ActiveView>,
    current: ActiveView,
}

impl ViewStack {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            current: ActiveView::Hub,
        }
    }

    pub fn current(&self) -> ActiveView {
        self.current
    }

    pub fn push(&mut self, view: ActiveView) {
        if view == self.current {
            return;
        }
        self.history.push(self.current);
        self.current = view;
    }

    /// Returns to the previous view. False when already at the root.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }

    pub fn home(&mut self) {
        self.history.clear();
        self.current = ActiveView::Hub;
    }
}

impl Default for ViewStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back() {
        let mut views = ViewStack::new();
        assert!(!views.back());
        assert_eq!(views.current(), ActiveView::Hub);

        views.push(ActiveView::Verify);
        views.push(ActiveView::Messages);
        assert_eq!(views.current(), ActiveView::Messages);

        assert!(views.back());
        assert_eq!(views.current(), ActiveView::Verify);
        assert!(views.back());
        assert_eq!(views.current(), ActiveView::Hub);
        assert!(!views.back());
    }

    #[test]
    fn test_push_same_view_is_ignored() {
        let mut views = ViewStack::new();
        views.push(ActiveView::Coach);
        views.push(ActiveView::Coach);
        assert!(views.back());
        assert_eq!(views.current(), ActiveView::Hub);
    }

    #[test]
    fn test_home_clears_history() {
        let mut views = ViewStack::new();
        views.push(ActiveView::Coach);
        views.push(ActiveView::Detail(MenuKey::Settings));
        views.home();
        assert_eq!(views.current(), ActiveView::Hub);
        assert!(!views.back());
    }

    #[test]
    fn test_dashboard_only_for_employers() {
        assert_eq!(
            view_for(MenuKey::Dashboard, UserType::Employer),
            Some(ActiveView::Dashboard)
        );
        assert_eq!(view_for(MenuKey::Dashboard, UserType::Candidate), None);
    }

    #[test]
    fn test_menu_routes() {
        assert_eq!(
            view_for(MenuKey::Jobs, UserType::Candidate),
            Some(ActiveView::Swipe(UserType::Candidate))
        );
        assert_eq!(
            view_for(MenuKey::Company, UserType::Employer),
            Some(ActiveView::Detail(MenuKey::Company))
        );
        assert_eq!(view_for(MenuKey::UploadJobs, UserType::Employer), Some(ActiveView::AddJob));
    }
}
