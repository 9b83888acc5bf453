use review_logging::{review_debug, review_info};

use crate::state::{EditSurface, ResultPane};
use crate::{
    Action, AppState, BulkAction, EditMode, Effect, ListItemUpdate, Msg, PendingConfirmation,
    ReviewError, RunPhase,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if !matches!(msg, Msg::NoOp) {
        state.clear_condition();
    }

    let effects = match msg {
        Msg::StartClicked { mode } => {
            if state.start_enabled() {
                state.request_run();
                review_info!("Requesting run in mode {:?}", mode);
                vec![Effect::Execute { mode }]
            } else {
                state.report(ReviewError::RunInProgress);
                Vec::new()
            }
        }
        Msg::TotalBookmarks { total } => {
            state.begin_run(total);
            Vec::new()
        }
        Msg::CountersUpdated(snapshot) => {
            state.apply_counters(snapshot);
            Vec::new()
        }
        Msg::Finished { bookmarks, debug } => {
            if state.phase() != RunPhase::Running {
                review_debug!("Finished arrived in phase {:?}", state.phase());
            }
            state.finish_with_tree(&bookmarks, debug);
            Vec::new()
        }
        Msg::DuplicatesReported { warnings, groups } => {
            state.finish_with_duplicates(warnings, groups);
            Vec::new()
        }
        Msg::ListItemUpdated {
            bookmark_id,
            update,
        } => {
            if let Err(condition) = apply_list_item_update(&mut state, &bookmark_id, update) {
                state.report(condition);
            }
            Vec::new()
        }
        Msg::SearchChanged(pattern) => {
            let result = match state.pane_mut() {
                ResultPane::Tree(results) => results.set_search_pattern(&pattern),
                other => Err(mismatch("search", other)),
            };
            match result {
                Ok(()) => state.mark_dirty(),
                Err(condition) => state.report(condition),
            }
            Vec::new()
        }
        Msg::CategoryToggled { tag, enabled } => {
            let result = match state.pane_mut() {
                ResultPane::Tree(results) => {
                    results.set_category_enabled(tag, enabled);
                    Ok(())
                }
                other => Err(mismatch("category filter", other)),
            };
            match result {
                Ok(()) => state.mark_dirty(),
                Err(condition) => state.report(condition),
            }
            Vec::new()
        }
        Msg::ActionRequested(action) => {
            request_action(&mut state, action);
            Vec::new()
        }
        Msg::ConfirmationAnswered(confirmed) => answer_confirmation(&mut state, confirmed),
        Msg::EditSubmitted { title, url } => submit_edit(&mut state, title, url),
        Msg::EditCancelled => {
            if state.take_edit().is_none() {
                state.report(ReviewError::NothingPending("an edit"));
            }
            Vec::new()
        }
        Msg::RepairAllRedirectsClicked => {
            request_bulk(&mut state, BulkAction::RepairAllRedirects);
            Vec::new()
        }
        Msg::RemoveAllErrorsClicked => {
            request_bulk(&mut state, BulkAction::RemoveAllErrors);
            Vec::new()
        }
        Msg::ViewClosed => {
            state.close_view();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn mismatch(action: &'static str, pane: &ResultPane) -> ReviewError {
    ReviewError::ModeMismatch {
        action,
        pane: pane.name(),
    }
}

fn apply_list_item_update(
    state: &mut AppState,
    bookmark_id: &crate::BookmarkId,
    update: ListItemUpdate,
) -> Result<(), ReviewError> {
    match (state.pane_mut(), update) {
        (ResultPane::Tree(results), ListItemUpdate::Replace(node)) => {
            let outcome = results.replace_subtree(bookmark_id, &node)?;
            review_debug!("update-listitem {} -> {:?}", bookmark_id, outcome);
        }
        (ResultPane::Duplicates(view), ListItemUpdate::Retitle { title, path }) => {
            view.retitle(bookmark_id, title, path)?;
        }
        (pane, _) => return Err(mismatch("update-listitem", pane)),
    }
    state.mark_dirty();
    Ok(())
}

fn request_action(state: &mut AppState, action: Action) {
    let checked = match (state.pane(), &action) {
        (ResultPane::Tree(results), Action::Edit { id, mode: EditMode::Default }) => results
            .edit_prefill(id)
            .map(|(title, url)| Some((title, url, EditMode::Default))),
        (ResultPane::Duplicates(view), Action::Edit { id, mode: EditMode::Duplicate }) => view
            .find(id)
            .map(|entry| Some((entry.title.clone(), entry.url.clone(), EditMode::Duplicate)))
            .ok_or_else(|| ReviewError::UnknownNode(id.clone())),
        (ResultPane::Tree(results), Action::Remove { id }) => {
            results.check_removable(id).map(|()| None)
        }
        (ResultPane::Tree(results), Action::RepairRedirect { id, .. }) => {
            results.check_repairable(id).map(|()| None)
        }
        (ResultPane::Duplicates(view), Action::Remove { id }) => view
            .find(id)
            .map(|_| None)
            .ok_or_else(|| ReviewError::UnknownNode(id.clone())),
        (pane, action) => Err(mismatch(action.name(), pane)),
    };

    let prefill = match checked {
        Ok(prefill) => prefill,
        Err(condition) => {
            state.report(condition);
            return;
        }
    };

    if action.is_destructive() {
        review_debug!("Awaiting confirmation for {} on {}", action.name(), action.id());
        state.set_pending(PendingConfirmation::Single(action));
    } else if let Some((title, url, mode)) = prefill {
        state.open_edit(EditSurface {
            bookmark_id: action.id().clone(),
            title,
            url,
            mode,
        });
    }
}

fn request_bulk(state: &mut AppState, bulk: BulkAction) {
    if !matches!(state.pane(), ResultPane::Tree(_)) {
        let condition = mismatch("bulk action", state.pane());
        state.report(condition);
        return;
    }
    if !state.affordances().show_mass_actions {
        state.report(ReviewError::BulkActionsUnavailable);
        return;
    }
    state.set_pending(PendingConfirmation::Bulk(bulk));
}

fn answer_confirmation(state: &mut AppState, confirmed: bool) -> Vec<Effect> {
    let Some(pending) = state.take_pending() else {
        state.report(ReviewError::NothingPending("a confirmation"));
        return Vec::new();
    };
    if !confirmed {
        review_debug!("Confirmation declined for {:?}", pending);
        return Vec::new();
    }

    let result = match (state.pane_mut(), pending) {
        (ResultPane::Tree(results), PendingConfirmation::Single(Action::Remove { id })) => {
            results.remove(&id).map(|effect| vec![effect])
        }
        (
            ResultPane::Tree(results),
            PendingConfirmation::Single(Action::RepairRedirect { id, new_url }),
        ) => results.repair_redirect(&id, &new_url).map(|effect| vec![effect]),
        (ResultPane::Duplicates(view), PendingConfirmation::Single(Action::Remove { id })) => {
            view.remove(&id).map(|effect| vec![effect])
        }
        (ResultPane::Tree(results), PendingConfirmation::Bulk(BulkAction::RepairAllRedirects)) => {
            Ok(results.repair_all_visible_redirects())
        }
        (ResultPane::Tree(results), PendingConfirmation::Bulk(BulkAction::RemoveAllErrors)) => {
            Ok(results.remove_all_visible_errors())
        }
        (pane, _) => Err(mismatch("confirmed action", pane)),
    };

    match result {
        Ok(effects) => {
            state.mark_dirty();
            effects
        }
        Err(condition) => {
            state.report(condition);
            Vec::new()
        }
    }
}

fn submit_edit(state: &mut AppState, title: String, url: String) -> Vec<Effect> {
    let Some(surface) = state.take_edit() else {
        state.report(ReviewError::NothingPending("an edit"));
        return Vec::new();
    };

    if let Err(err) = url::Url::parse(&url) {
        state.open_edit(EditSurface { title, url: url.clone(), ..surface });
        state.report(ReviewError::InvalidUrl {
            url,
            reason: err.to_string(),
        });
        return Vec::new();
    }

    review_info!("Submitting edit for {}", surface.bookmark_id);
    vec![Effect::Edit {
        bookmark_id: surface.bookmark_id,
        title,
        url,
        mode: surface.mode,
    }]
}
