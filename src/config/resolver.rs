use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{
    DashboardAction, DialogAction, DocumentsAction, GlobalAction, LegalAction, NavAction,
    RolesAction, SearchAction,
};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events onto configured actions and renders binding hints.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::Help => &kb.help,
            GlobalAction::Theme => &kb.theme,
            GlobalAction::Back => &kb.back,
            GlobalAction::About => &kb.about,
            GlobalAction::Legal => &kb.legal,
        }
    }

    fn nav(&self, action: NavAction) -> &KeyBinding {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => &kb.up,
            NavAction::Down => &kb.down,
            NavAction::Left => &kb.left,
            NavAction::Right => &kb.right,
            NavAction::PageUp => &kb.page_up,
            NavAction::PageDown => &kb.page_down,
            NavAction::Home => &kb.home,
            NavAction::End => &kb.end,
            NavAction::Select => &kb.select,
        }
    }

    fn search(&self, action: SearchAction) -> &KeyBinding {
        let kb = &self.keybindings.search;
        match action {
            SearchAction::Toggle => &kb.toggle,
            SearchAction::Exit => &kb.exit,
        }
    }

    fn documents(&self, action: DocumentsAction) -> &KeyBinding {
        let kb = &self.keybindings.documents;
        match action {
            DocumentsAction::Upload => &kb.upload,
            DocumentsAction::Reload => &kb.reload,
        }
    }

    fn dashboard(&self, action: DashboardAction) -> &KeyBinding {
        let kb = &self.keybindings.dashboard;
        match action {
            DashboardAction::SeeAll => &kb.see_all,
        }
    }

    fn roles(&self, action: RolesAction) -> &KeyBinding {
        let kb = &self.keybindings.roles;
        match action {
            RolesAction::Customer => &kb.customer,
            RolesAction::Provider => &kb.provider,
        }
    }

    fn legal(&self, action: LegalAction) -> &KeyBinding {
        let kb = &self.keybindings.legal;
        match action {
            LegalAction::NextTab => &kb.next_tab,
            LegalAction::PreviousTab => &kb.previous_tab,
        }
    }

    fn dialog(&self, action: DialogAction) -> &KeyBinding {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Dismiss => &kb.dismiss,
        }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global(action).display()
    }

    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        self.nav(action).matches(event)
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        self.nav(action).display()
    }

    pub fn matches_search(&self, event: &KeyEvent, action: SearchAction) -> bool {
        self.search(action).matches(event)
    }

    pub fn display_search(&self, action: SearchAction) -> String {
        self.search(action).display()
    }

    pub fn matches_documents(&self, event: &KeyEvent, action: DocumentsAction) -> bool {
        self.documents(action).matches(event)
    }

    pub fn display_documents(&self, action: DocumentsAction) -> String {
        self.documents(action).display()
    }

    pub fn matches_dashboard(&self, event: &KeyEvent, action: DashboardAction) -> bool {
        self.dashboard(action).matches(event)
    }

    pub fn display_dashboard(&self, action: DashboardAction) -> String {
        self.dashboard(action).display()
    }

    pub fn matches_roles(&self, event: &KeyEvent, action: RolesAction) -> bool {
        self.roles(action).matches(event)
    }

    pub fn display_roles(&self, action: RolesAction) -> String {
        self.roles(action).display()
    }

    pub fn matches_legal(&self, event: &KeyEvent, action: LegalAction) -> bool {
        self.legal(action).matches(event)
    }

    pub fn display_legal(&self, action: LegalAction) -> String {
        self.legal(action).display()
    }

    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        self.dialog(action).matches(event)
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        self.dialog(action).display()
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}
