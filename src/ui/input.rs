//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes. Modal form keys are routed to the form
//! structs; anything that needs an API call goes through `App` methods so
//! the borrow on the form ends first.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, Tab, PAGE_SCROLL_SIZE};
use crate::forms::{OffboardField, OnboardingField};

/// App-level action decided while the form was mutably borrowed
enum Followup {
    None,
    CloseModal,
    CyclePhoneChoice,
    Submit,
}

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            Ok(false)
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            Ok(false)
        }
        AppState::Searching => {
            handle_search_input(app, key);
            Ok(false)
        }
        AppState::Onboarding => {
            handle_onboarding_input(app, key);
            Ok(false)
        }
        AppState::Offboarding => {
            handle_offboard_input(app, key);
            Ok(false)
        }
        AppState::Normal => handle_normal_input(app, key),
        AppState::Quitting => Ok(true),
    }
}

fn handle_normal_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('1') => app.current_tab = Tab::Vas,
        KeyCode::Char('2') => app.current_tab = Tab::Phones,
        KeyCode::Char('3') => app.current_tab = Tab::Creators,
        KeyCode::Left => app.current_tab = app.current_tab.prev(),
        KeyCode::Right => app.current_tab = app.current_tab.next(),
        KeyCode::Char('j') | KeyCode::Down => move_selection(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_selection(app, -1),
        KeyCode::PageDown => move_selection(app, PAGE_SCROLL_SIZE as isize),
        KeyCode::PageUp => move_selection(app, -(PAGE_SCROLL_SIZE as isize)),
        KeyCode::Char('/') => {
            if app.current_tab == Tab::Vas {
                app.state = AppState::Searching;
            }
        }
        KeyCode::Char('u') => app.refresh_all(),
        KeyCode::Char('o') => {
            if let Some(va_id) = app.selected_va().map(|va| va.id) {
                app.open_onboarding(va_id);
            }
        }
        KeyCode::Char('x') => {
            if let Some(va_id) = app.selected_va().map(|va| va.id) {
                app.open_offboard(va_id);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn move_selection(app: &mut App, delta: isize) {
    let len = match app.current_tab {
        Tab::Vas => app.filtered_vas().len(),
        Tab::Phones => app.data.phones.len(),
        Tab::Creators => app.data.creators.len(),
    };
    if len == 0 {
        return;
    }
    let selection = match app.current_tab {
        Tab::Vas => &mut app.va_selection,
        Tab::Phones => &mut app.phone_selection,
        Tab::Creators => &mut app.creator_selection,
    };
    let new = (*selection as isize + delta).clamp(0, len as isize - 1);
    *selection = new as usize;
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_query.clear();
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
        }
        _ => {}
    }
    app.va_selection = 0;
}

fn handle_onboarding_input(app: &mut App, key: KeyEvent) {
    let followup = {
        let Some(form) = app.onboarding_form.as_mut() else {
            return;
        };
        let on_select = form.focus == OnboardingField::PhoneFromVa;
        match key.code {
            KeyCode::Esc => Followup::CloseModal,
            KeyCode::Tab => {
                form.focus_next();
                Followup::None
            }
            KeyCode::BackTab => {
                form.focus_prev();
                Followup::None
            }
            KeyCode::Down if on_select => {
                form.transfer_select.cursor_down();
                Followup::None
            }
            KeyCode::Up if on_select => {
                form.transfer_select.cursor_up();
                Followup::None
            }
            KeyCode::Down => {
                form.focus_next();
                Followup::None
            }
            KeyCode::Up => {
                form.focus_prev();
                Followup::None
            }
            KeyCode::Enter if on_select => {
                form.transfer_select.choose_under_cursor();
                Followup::None
            }
            KeyCode::Enter if form.focus == OnboardingField::Submit => Followup::Submit,
            KeyCode::Enter => {
                form.focus_next();
                Followup::None
            }
            KeyCode::Char(' ') if form.focus == OnboardingField::PhoneType => {
                Followup::CyclePhoneChoice
            }
            KeyCode::Char(' ')
                if matches!(
                    form.focus,
                    OnboardingField::AppleCode
                        | OnboardingField::ProxyConfigured
                        | OnboardingField::Training
                ) =>
            {
                form.toggle_focused_checkbox();
                Followup::None
            }
            KeyCode::Char(c) if on_select => {
                form.transfer_select.push_char(c);
                Followup::None
            }
            KeyCode::Char(c) => {
                if let Some(text) = form.focused_text_mut() {
                    text.push(c);
                }
                Followup::None
            }
            KeyCode::Backspace if on_select => {
                form.transfer_select.backspace();
                Followup::None
            }
            KeyCode::Backspace => {
                if let Some(text) = form.focused_text_mut() {
                    text.pop();
                }
                Followup::None
            }
            _ => Followup::None,
        }
    };

    match followup {
        Followup::CloseModal => app.close_modal(),
        Followup::CyclePhoneChoice => app.cycle_onboarding_phone_type(),
        Followup::Submit => app.submit_onboarding(),
        Followup::None => {}
    }
}

fn handle_offboard_input(app: &mut App, key: KeyEvent) {
    let followup = {
        let Some(form) = app.offboard_form.as_mut() else {
            return;
        };
        let on_select = form.focus == OffboardField::TransferTo;
        match key.code {
            KeyCode::Esc => Followup::CloseModal,
            KeyCode::Tab => {
                form.focus_next();
                Followup::None
            }
            KeyCode::BackTab => {
                form.focus_prev();
                Followup::None
            }
            KeyCode::Down if on_select => {
                form.transfer_select.cursor_down();
                Followup::None
            }
            KeyCode::Up if on_select => {
                form.transfer_select.cursor_up();
                Followup::None
            }
            KeyCode::Down => {
                form.focus_next();
                Followup::None
            }
            KeyCode::Up => {
                form.focus_prev();
                Followup::None
            }
            KeyCode::Enter if on_select => {
                form.transfer_select.choose_under_cursor();
                Followup::None
            }
            KeyCode::Enter if form.focus == OffboardField::Submit => Followup::Submit,
            KeyCode::Enter => {
                form.focus_next();
                Followup::None
            }
            KeyCode::Char(' ') if form.focus == OffboardField::PhoneHandling => {
                Followup::CyclePhoneChoice
            }
            KeyCode::Char(c) if on_select => {
                form.transfer_select.push_char(c);
                Followup::None
            }
            KeyCode::Char(c) => {
                if let Some(text) = form.focused_text_mut() {
                    text.push(c);
                }
                Followup::None
            }
            KeyCode::Backspace if on_select => {
                form.transfer_select.backspace();
                Followup::None
            }
            KeyCode::Backspace => {
                if let Some(text) = form.focused_text_mut() {
                    text.pop();
                }
                Followup::None
            }
            _ => Followup::None,
        }
    };

    match followup {
        Followup::CloseModal => app.close_modal(),
        Followup::CyclePhoneChoice => app.cycle_offboard_phone_handling(),
        Followup::Submit => app.submit_offboard(),
        Followup::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Va, VaStatus};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_roster() -> App {
        let mut app = App::new(Config::default()).unwrap();
        app.data.vas = vec![
            Va {
                id: 1,
                full_name: "Maria Santos".to_string(),
                telegram_handle: "maria_s".to_string(),
                va_type: "content".to_string(),
                status: VaStatus::Active,
                onboarding_date: None,
            },
            Va {
                id: 2,
                full_name: "Jose Cruz".to_string(),
                telegram_handle: "jose_c".to_string(),
                va_type: "support".to_string(),
                status: VaStatus::Active,
                onboarding_date: None,
            },
        ];
        app
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut app = app_with_roster();
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).unwrap());
    }

    #[test]
    fn test_onboard_key_opens_modal_for_selected_va() {
        let mut app = app_with_roster();
        handle_input(&mut app, key(KeyCode::Char('j'))).unwrap();
        handle_input(&mut app, key(KeyCode::Char('o'))).unwrap();
        assert_eq!(app.state, AppState::Onboarding);
        assert_eq!(app.onboarding_form.as_ref().unwrap().va_id, 2);
    }

    #[test]
    fn test_search_filters_roster() {
        let mut app = app_with_roster();
        handle_input(&mut app, key(KeyCode::Char('/'))).unwrap();
        assert_eq!(app.state, AppState::Searching);
        for c in "jose".chars() {
            handle_input(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(app.filtered_vas().len(), 1);
        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(app.search_query.is_empty());
        assert_eq!(app.filtered_vas().len(), 2);
    }

    #[test]
    fn test_modal_checkbox_and_text_entry() {
        let mut app = app_with_roster();
        app.open_onboarding(1);
        handle_input(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.onboarding_form.as_ref().unwrap().apple_code_provided);

        // Tab to the offboard reason field and type into it
        let mut app = app_with_roster();
        app.open_offboard(1);
        for c in "resigned".chars() {
            handle_input(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(app.offboard_form.as_ref().unwrap().reason, "resigned");
    }

    #[test]
    fn test_esc_closes_modal_when_idle() {
        let mut app = app_with_roster();
        app.open_offboard(1);
        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.state, AppState::Normal);
    }
}
