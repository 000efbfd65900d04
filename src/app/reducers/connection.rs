//! Connection sub-reducer: the Home screen, the connection form and
//! connection lifecycle messages.

use std::time::Instant;

use crate::app::action::Action;
use crate::app::connection_form::{ConnectionForm, FormMode};
use crate::app::effect::Effect;
use crate::app::reducers::request_confirmation;
use crate::app::screen::{Panel, Screen};
use crate::app::state::AppState;

/// Returns Some(effects) if action was handled, None otherwise.
pub fn reduce_connection(
    state: &mut AppState,
    action: &Action,
    now: Instant,
) -> Option<Vec<Effect>> {
    match action {
        Action::HomeSelectNext => {
            let last = state.config.connections.len().saturating_sub(1);
            state.home.selected = (state.home.selected + 1).min(last);
            Some(vec![])
        }
        Action::HomeSelectPrevious => {
            state.home.selected = state.home.selected.saturating_sub(1);
            Some(vec![])
        }
        Action::HomeSelectFirst => {
            state.home.selected = 0;
            Some(vec![])
        }
        Action::HomeSelectLast => {
            state.home.selected = state.config.connections.len().saturating_sub(1);
            Some(vec![])
        }
        Action::HomeConnect => {
            let name = state.selected_profile()?.name.clone();
            Some(connect(state, name))
        }
        Action::OpenCreateForm => {
            state.home.form = Some(ConnectionForm::create());
            Some(vec![])
        }
        Action::OpenEditForm => {
            let form = ConnectionForm::edit(state.selected_profile()?);
            state.home.form = Some(form);
            Some(vec![])
        }
        Action::RequestDeleteConnection => {
            let name = state.selected_profile()?.name.clone();
            let prompt = format!("Delete connection \"{}\"? (y/n)", name);
            Some(request_confirmation(
                state,
                prompt,
                Action::DeleteConnection { name },
                now,
            ))
        }
        Action::DeleteConnection { name } => {
            state.config.connections.retain(|c| &c.name != name);
            state.sync_connections();
            if state.active_connection.as_ref() == Some(name) {
                state.active_connection = None;
            }
            Some(vec![Effect::Sequence(vec![
                Effect::RemoveConnection { name: name.clone() },
                Effect::SaveConfig {
                    config: Box::new(state.config.clone()),
                    notice: "Connection deleted".to_string(),
                },
            ])])
        }

        Action::FormNextField => {
            state.home.form.as_mut()?.next_field();
            Some(vec![])
        }
        Action::FormPrevField => {
            state.home.form.as_mut()?.prev_field();
            Some(vec![])
        }
        Action::FormInput(c) => {
            state.home.form.as_mut()?.push_char(*c);
            Some(vec![])
        }
        Action::FormBackspace => {
            state.home.form.as_mut()?.pop_char();
            Some(vec![])
        }
        Action::FormCancel => {
            state.home.form = None;
            Some(vec![])
        }
        Action::FormSubmit => {
            let form = state.home.form.as_ref()?;
            let profile = match form.to_profile(&state.config.connections) {
                Ok(profile) => profile,
                Err(e) => {
                    state.messages.set_error_at(e.to_string(), now);
                    return Some(vec![]);
                }
            };

            let registry_effect = match &form.mode {
                FormMode::Create => {
                    state.config.connections.push(profile.clone());
                    Effect::RegisterConnection(profile.clone())
                }
                FormMode::Edit { original } => {
                    let original = original.clone();
                    match state
                        .config
                        .connections
                        .iter_mut()
                        .find(|c| c.name == original)
                    {
                        Some(slot) => *slot = profile.clone(),
                        None => state.config.connections.push(profile.clone()),
                    }
                    if state.active_connection.as_ref() == Some(&original) {
                        state.active_connection = None;
                    }
                    // the old handle is closed, so its tree state goes too
                    state.sidebar.mark_disconnected(&original);
                    Effect::UpdateConnection {
                        old_name: original,
                        profile: profile.clone(),
                    }
                }
            };

            state.home.form = None;
            state.sync_connections();
            if let Some(idx) = state
                .config
                .connections
                .iter()
                .position(|c| c.name == profile.name)
            {
                state.home.selected = idx;
            }

            Some(vec![Effect::Sequence(vec![
                registry_effect,
                Effect::SaveConfig {
                    config: Box::new(state.config.clone()),
                    notice: "Connection saved".to_string(),
                },
            ])])
        }

        Action::ConfigSaved { notice } => {
            state.messages.set_success_at(notice.clone(), now);
            Some(vec![])
        }
        Action::ConfigSaveFailed { error } => {
            state
                .messages
                .set_error_at(format!("Save failed: {}", error), now);
            Some(vec![])
        }

        Action::Connected { name } => {
            state.messages.stop_loading();
            state.screen = Screen::Browse;
            state.panel = Panel::Sidebar;
            state.input_focused = false;
            state.active_connection = Some(name.clone());
            state.pk_cache.invalidate_connection(name);
            state.sidebar.mark_connected(name);
            state.sidebar.select_connection(name);
            state.sync_table_viewport();
            state
                .messages
                .set_success_at(format!("Connected to {}", name), now);
            Some(vec![Effect::LoadTables { name: name.clone() }])
        }
        Action::ConnectFailed { error, .. } => {
            state.messages.stop_loading();
            state
                .messages
                .set_error_at(format!("Connect failed: {}", error), now);
            Some(vec![])
        }
        Action::Disconnected { name } => {
            state.sidebar.mark_disconnected(name);
            if state.active_connection.as_ref() == Some(name) {
                state.active_connection = None;
            }
            state
                .messages
                .set_success_at(format!("Disconnected from {}", name), now);
            Some(vec![])
        }
        Action::TablesLoaded { name, tables } => {
            state.messages.stop_loading();
            state.sidebar.load_tables(name, tables.clone());
            Some(vec![])
        }
        Action::TablesFailed { error, .. } => {
            state.messages.stop_loading();
            state
                .messages
                .set_error_at(format!("Load tables failed: {}", error), now);
            Some(vec![])
        }
        _ => None,
    }
}

/// Dials `name` and shows a loading indicator until the answer arrives.
pub fn connect(state: &mut AppState, name: String) -> Vec<Effect> {
    state
        .messages
        .start_loading(format!("Connecting to {}...", name));
    vec![Effect::Connect { name }]
}
