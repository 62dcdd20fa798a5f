use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{
    DashboardKeybindings, DialogKeybindings, DocumentsKeybindings, GlobalKeybindings,
    LegalKeybindings, NavigationKeybindings, RolesKeybindings, SearchKeybindings,
};

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            help: Key::new(KeyCode::Char('?')).into(),
            theme: Key::new(KeyCode::Char('t')).into(),
            back: Key::new(KeyCode::Esc).into(),
            about: Key::new(KeyCode::F(1)).into(),
            legal: Key::new(KeyCode::F(2)).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![Key::new(KeyCode::Char('k')), Key::new(KeyCode::Up)]),
            down: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('j')),
                Key::new(KeyCode::Down),
            ]),
            left: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('h')),
                Key::new(KeyCode::Left),
            ]),
            right: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('l')),
                Key::new(KeyCode::Right),
            ]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('g')),
                Key::new(KeyCode::Home),
            ]),
            end: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('G')),
                Key::new(KeyCode::End),
            ]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for SearchKeybindings {
    fn default() -> Self {
        Self {
            toggle: Key::new(KeyCode::Char('/')).into(),
            exit: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for DocumentsKeybindings {
    fn default() -> Self {
        Self {
            upload: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('u')),
                Key::new(KeyCode::Char('a')),
            ]),
            reload: Key::new(KeyCode::Char('r')).into(),
        }
    }
}

impl Default for DashboardKeybindings {
    fn default() -> Self {
        Self {
            see_all: Key::new(KeyCode::Char('s')).into(),
        }
    }
}

impl Default for RolesKeybindings {
    fn default() -> Self {
        Self {
            customer: Key::new(KeyCode::Char('c')).into(),
            provider: Key::new(KeyCode::Char('p')).into(),
        }
    }
}

impl Default for LegalKeybindings {
    fn default() -> Self {
        Self {
            next_tab: KeyBinding::multiple(vec![
                Key::new(KeyCode::Tab),
                Key::new(KeyCode::Right),
                Key::new(KeyCode::Char('l')),
            ]),
            previous_tab: KeyBinding::multiple(vec![
                Key::new(KeyCode::BackTab),
                Key::new(KeyCode::Left),
                Key::new(KeyCode::Char('h')),
            ]),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            dismiss: KeyBinding::multiple(vec![
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Esc),
                Key::new(KeyCode::Char('q')),
            ]),
        }
    }
}
