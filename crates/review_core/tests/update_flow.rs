use std::sync::Once;

use pretty_assertions::assert_eq;
use review_core::{
    update, Action, AppState, BookmarkId, BookmarkStatus, BulkAction, CategoryTag,
    CounterSnapshot, DuplicateEntry, DuplicateGroup, EditMode, Effect, ListItemUpdate, Msg,
    PendingConfirmation, ResultNode, ReviewError, RunPhase, INITIAL_PROGRESS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(review_logging::initialize_for_tests);
}

fn id(raw: &str) -> BookmarkId {
    BookmarkId::new(raw)
}

fn scenario() -> Vec<ResultNode> {
    vec![
        ResultNode::folder(
            "A",
            "Folder A",
            vec![ResultNode::leaf(
                "Y",
                "Bookmark Y",
                "https://y.example/missing",
                Some(BookmarkStatus::NotFound),
            )],
        ),
        ResultNode::folder(
            "B",
            "Folder B",
            vec![ResultNode::leaf(
                "Z",
                "Bookmark Z",
                "http://z.example",
                Some(BookmarkStatus::Redirect),
            )
            .with_new_url("https://z.example")],
        ),
    ]
}

fn counters(errors: u64, warnings: u64, unknown: u64) -> CounterSnapshot {
    CounterSnapshot {
        total: 5,
        checked: 5,
        errors,
        warnings,
        unknown,
        progress: 1.0,
    }
}

/// Drives a full run: start, announce, stream counters, finish.
fn finished_run(snapshot: CounterSnapshot, bookmarks: Vec<ResultNode>) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::StartClicked {
            mode: "broken-bookmarks".to_string(),
        },
    );
    let (state, _) = update(state, Msg::TotalBookmarks { total: 5 });
    let (state, _) = update(state, Msg::CountersUpdated(snapshot));
    let (mut state, _) = update(
        state,
        Msg::Finished {
            bookmarks,
            debug: Vec::new(),
        },
    );
    state.consume_dirty();
    state
}

fn row_ids(state: &AppState) -> Vec<String> {
    state.view().rows.iter().map(|row| row.id.to_string()).collect()
}

fn duplicate_entry(raw: &str, title: &str, url: &str) -> DuplicateEntry {
    DuplicateEntry {
        id: id(raw),
        title: title.to_string(),
        path: vec!["Toolbar".to_string(), "News".to_string()],
        url: url.to_string(),
    }
}

#[test]
fn start_emits_execute_and_blocks_a_second_run() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::StartClicked {
            mode: "broken-bookmarks".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Execute {
            mode: "broken-bookmarks".to_string()
        }]
    );
    assert_eq!(state.phase(), RunPhase::Requested);
    assert!(!state.view().start_enabled);

    let (state, effects) = update(
        state,
        Msg::StartClicked {
            mode: "duplicates".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.last_condition(), Some(&ReviewError::RunInProgress));
}

#[test]
fn total_bookmarks_resets_counters_and_previous_results() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    assert!(!state.view().rows.is_empty());

    let (mut state, _) = update(state, Msg::TotalBookmarks { total: 42 });
    let view = state.view();

    assert_eq!(view.phase, RunPhase::Running);
    assert!(!view.start_enabled);
    assert_eq!(view.counters.total, 42);
    assert_eq!(view.counters.checked, 0);
    assert_eq!(view.counters.errors, 0);
    assert_eq!(view.counters.progress, INITIAL_PROGRESS);
    assert!(view.rows.is_empty());
    assert!(state.consume_dirty());
}

#[test]
fn counters_replace_and_progress_never_regresses() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TotalBookmarks { total: 10 });
    let (state, _) = update(
        state,
        Msg::CountersUpdated(CounterSnapshot {
            total: 10,
            checked: 6,
            errors: 2,
            warnings: 1,
            unknown: 0,
            progress: 0.6,
        }),
    );
    let (state, _) = update(
        state,
        Msg::CountersUpdated(CounterSnapshot {
            total: 10,
            checked: 5,
            errors: 1,
            warnings: 1,
            unknown: 1,
            progress: 0.5,
        }),
    );

    let view = state.view();
    assert_eq!(view.counters.checked, 5);
    assert_eq!(view.counters.errors, 1);
    assert_eq!(view.counters.progress, 0.6);
}

#[test]
fn finished_with_issues_offers_search_filters_and_mass_actions() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let view = state.view();

    assert_eq!(view.phase, RunPhase::Finished);
    assert!(view.start_enabled);
    assert!(!view.affordances.show_no_results);
    assert!(view.affordances.show_search);
    assert!(view.affordances.show_filters);
    assert!(view.affordances.show_mass_actions);
    assert!(!view.affordances.show_debug);
    assert_eq!(row_ids(&state), vec!["A", "Y", "B", "Z"]);
    assert_eq!(view.rows[1].depth, 1);
    assert_eq!(view.row(&id("Z")).unwrap().new_url.as_deref(), Some("https://z.example"));
}

#[test]
fn finished_without_issues_shows_no_results_state() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TotalBookmarks { total: 3 });
    let (state, _) = update(state, Msg::CountersUpdated(counters(0, 0, 0)));
    let (state, _) = update(
        state,
        Msg::Finished {
            bookmarks: Vec::new(),
            debug: vec!["{\"id\":1}".to_string(), "\"note\"".to_string()],
        },
    );
    let view = state.view();

    assert!(view.affordances.show_no_results);
    assert!(!view.affordances.show_search);
    assert!(!view.affordances.show_mass_actions);
    assert!(view.affordances.show_debug);
    assert_eq!(view.debug_output.as_deref(), Some("[{\"id\":1},\"note\"]"));
}

#[test]
fn remove_waits_for_confirmation() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());

    let (state, effects) = update(state, Msg::ActionRequested(Action::Remove { id: id("Y") }));
    assert!(effects.is_empty());
    assert_eq!(
        state.pending(),
        Some(&PendingConfirmation::Single(Action::Remove { id: id("Y") }))
    );
    assert!(row_ids(&state).contains(&"Y".to_string()));

    let (state, effects) = update(state, Msg::ConfirmationAnswered(true));
    assert_eq!(effects, vec![Effect::Remove { bookmark_id: id("Y") }]);
    assert_eq!(row_ids(&state), vec!["B", "Z"]);
    assert!(state.pending().is_none());
}

#[test]
fn declined_confirmation_changes_nothing() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let (state, _) = update(
        state,
        Msg::ActionRequested(Action::RepairRedirect {
            id: id("Z"),
            new_url: "https://z.example".to_string(),
        }),
    );
    let (state, effects) = update(state, Msg::ConfirmationAnswered(false));

    assert!(effects.is_empty());
    assert_eq!(row_ids(&state), vec!["A", "Y", "B", "Z"]);

    let (state, _) = update(state, Msg::ConfirmationAnswered(true));
    assert_eq!(
        state.last_condition(),
        Some(&ReviewError::NothingPending("a confirmation"))
    );
}

#[test]
fn action_on_unknown_id_is_reported() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let (state, effects) = update(state, Msg::ActionRequested(Action::Remove { id: id("ghost") }));

    assert!(effects.is_empty());
    assert!(state.pending().is_none());
    assert_eq!(state.last_condition(), Some(&ReviewError::UnknownNode(id("ghost"))));
}

#[test]
fn category_toggle_hides_folder_through_update() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let (mut state, _) = update(
        state,
        Msg::CategoryToggled {
            tag: CategoryTag::Error,
            enabled: false,
        },
    );

    assert!(state.consume_dirty());
    assert_eq!(row_ids(&state), vec!["B", "Z"]);
    assert!(state
        .view()
        .categories
        .contains(&(CategoryTag::Error, false)));
}

#[test]
fn invalid_search_is_reported_without_changing_filter() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let (state, _) = update(state, Msg::SearchChanged("bookmark y".to_string()));
    let (state, _) = update(state, Msg::SearchChanged("(".to_string()));

    assert!(matches!(
        state.last_condition(),
        Some(ReviewError::InvalidPattern { .. })
    ));
    assert_eq!(state.view().search_pattern, "bookmark y");
    assert_eq!(row_ids(&state), vec!["A", "Y"]);
}

#[test]
fn bulk_remove_respects_search_then_applies_after_clearing() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let (state, _) = update(state, Msg::SearchChanged("bookmark z".to_string()));

    let (state, _) = update(state, Msg::RemoveAllErrorsClicked);
    assert_eq!(
        state.pending(),
        Some(&PendingConfirmation::Bulk(BulkAction::RemoveAllErrors))
    );
    let (state, effects) = update(state, Msg::ConfirmationAnswered(true));
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::SearchChanged(String::new()));
    let (state, _) = update(state, Msg::RemoveAllErrorsClicked);
    let (state, effects) = update(state, Msg::ConfirmationAnswered(true));
    assert_eq!(effects, vec![Effect::Remove { bookmark_id: id("Y") }]);
    assert_eq!(row_ids(&state), vec!["B", "Z"]);
}

#[test]
fn bulk_actions_need_warnings_in_the_run() {
    init_logging();
    let state = finished_run(counters(1, 0, 0), scenario());
    let (state, effects) = update(state, Msg::RepairAllRedirectsClicked);

    assert!(effects.is_empty());
    assert!(state.pending().is_none());
    assert_eq!(state.last_condition(), Some(&ReviewError::BulkActionsUnavailable));
}

#[test]
fn edit_flow_prefills_validates_and_emits() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let (state, effects) = update(
        state,
        Msg::ActionRequested(Action::Edit {
            id: id("Y"),
            mode: EditMode::Default,
        }),
    );
    assert!(effects.is_empty());
    let surface = state.edit_surface().expect("edit surface open");
    assert_eq!(surface.title, "Bookmark Y");
    assert_eq!(surface.url, "https://y.example/missing");

    let (state, effects) = update(
        state,
        Msg::EditSubmitted {
            title: "Y fixed".to_string(),
            url: "not a url".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(matches!(state.last_condition(), Some(ReviewError::InvalidUrl { .. })));
    assert_eq!(state.edit_surface().unwrap().title, "Y fixed");

    let (state, effects) = update(
        state,
        Msg::EditSubmitted {
            title: "Y fixed".to_string(),
            url: "https://y.example/".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Edit {
            bookmark_id: id("Y"),
            title: "Y fixed".to_string(),
            url: "https://y.example/".to_string(),
            mode: EditMode::Default,
        }]
    );
    assert!(state.edit_surface().is_none());
    assert!(state.last_condition().is_none());
}

#[test]
fn default_update_listitem_resolving_hides_folder() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let (state, _) = update(
        state,
        Msg::ListItemUpdated {
            bookmark_id: id("Y"),
            update: ListItemUpdate::Replace(ResultNode::leaf(
                "Y",
                "Y fixed",
                "https://y.example/",
                Some(BookmarkStatus::Ok),
            )),
        },
    );

    assert!(state.last_condition().is_none());
    assert_eq!(row_ids(&state), vec!["B", "Z"]);
}

#[test]
fn update_listitem_for_unknown_id_is_a_reported_noop() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let before = state.results().cloned();

    let (state, _) = update(
        state,
        Msg::ListItemUpdated {
            bookmark_id: id("missing"),
            update: ListItemUpdate::Replace(ResultNode::leaf("missing", "m", "https://m.example", None)),
        },
    );

    assert_eq!(state.results().cloned(), before);
    assert_eq!(state.last_condition(), Some(&ReviewError::UnknownNode(id("missing"))));
}

#[test]
fn duplicate_view_supports_remove_and_retitle_only() {
    init_logging();
    let groups = vec![
        DuplicateGroup {
            url: "https://news.example".to_string(),
            entries: vec![
                duplicate_entry("d1", "News", "https://news.example"),
                duplicate_entry("d2", "News copy", "https://news.example"),
            ],
        },
        DuplicateGroup {
            url: "https://solo.example".to_string(),
            entries: vec![duplicate_entry("d3", "Solo", "https://solo.example")],
        },
    ];
    let (state, _) = update(AppState::new(), Msg::TotalBookmarks { total: 3 });
    let (state, _) = update(state, Msg::DuplicatesReported { warnings: 2, groups });
    let view = state.view();
    assert_eq!(view.counters.warnings, 2);
    assert!(!view.affordances.show_no_results);
    assert!(!view.affordances.show_search);
    assert!(!view.affordances.show_filters);
    assert!(!view.affordances.show_mass_actions);
    assert_eq!(view.duplicates.len(), 2);
    assert!(view.rows.is_empty());

    let (state, _) = update(state, Msg::SearchChanged("news".to_string()));
    assert!(matches!(
        state.last_condition(),
        Some(ReviewError::ModeMismatch { action: "search", .. })
    ));

    let (state, _) = update(
        state,
        Msg::ListItemUpdated {
            bookmark_id: id("d2"),
            update: ListItemUpdate::Retitle {
                title: "Renamed".to_string(),
                path: vec!["Other".to_string()],
            },
        },
    );
    let entry = state.duplicates().unwrap().find(&id("d2")).unwrap();
    assert_eq!(entry.title, "Renamed");
    assert_eq!(entry.path_text(), "Other");

    let (state, _) = update(state, Msg::ActionRequested(Action::Remove { id: id("d3") }));
    let (state, effects) = update(state, Msg::ConfirmationAnswered(true));
    assert_eq!(effects, vec![Effect::Remove { bookmark_id: id("d3") }]);
    assert_eq!(state.view().duplicates.len(), 1);

    let (state, _) = update(state, Msg::RemoveAllErrorsClicked);
    assert!(state.pending().is_none());
    assert!(matches!(
        state.last_condition(),
        Some(ReviewError::ModeMismatch { .. })
    ));
}

#[test]
fn duplicate_edit_uses_duplicate_mode() {
    init_logging();
    let groups = vec![DuplicateGroup {
        url: "https://news.example".to_string(),
        entries: vec![duplicate_entry("d1", "News", "https://news.example")],
    }];
    let (state, _) = update(AppState::new(), Msg::DuplicatesReported { warnings: 1, groups });

    let (state, _) = update(
        state,
        Msg::ActionRequested(Action::Edit {
            id: id("d1"),
            mode: EditMode::Default,
        }),
    );
    assert!(state.edit_surface().is_none());

    let (state, _) = update(
        state,
        Msg::ActionRequested(Action::Edit {
            id: id("d1"),
            mode: EditMode::Duplicate,
        }),
    );
    let (_state, effects) = update(
        state,
        Msg::EditSubmitted {
            title: "News".to_string(),
            url: "https://news.example/today".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Edit {
            bookmark_id: id("d1"),
            title: "News".to_string(),
            url: "https://news.example/today".to_string(),
            mode: EditMode::Duplicate,
        }]
    );
}

#[test]
fn closing_the_view_drops_results() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());
    let (state, _) = update(state, Msg::ActionRequested(Action::Remove { id: id("Y") }));
    let (state, _) = update(state, Msg::ViewClosed);

    assert!(state.results().is_none());
    assert!(state.pending().is_none());
    assert!(state.view().rows.is_empty());
}

#[test]
fn actions_on_folders_and_non_redirects_are_refused() {
    init_logging();
    let state = finished_run(counters(1, 1, 0), scenario());

    let (state, _) = update(
        state,
        Msg::ActionRequested(Action::RepairRedirect {
            id: id("A"),
            new_url: "https://elsewhere.example".to_string(),
        }),
    );
    assert!(state.pending().is_none());
    assert_eq!(state.last_condition(), Some(&ReviewError::NotABookmark(id("A"))));

    let (state, _) = update(state, Msg::ActionRequested(Action::Remove { id: id("B") }));
    assert!(state.pending().is_none());
    assert_eq!(state.last_condition(), Some(&ReviewError::NotABookmark(id("B"))));

    let (state, _) = update(
        state,
        Msg::ActionRequested(Action::RepairRedirect {
            id: id("Y"),
            new_url: "https://y.example".to_string(),
        }),
    );
    assert!(state.pending().is_none());
    assert_eq!(state.last_condition(), Some(&ReviewError::NotARedirect(id("Y"))));

    let (state, effects) = update(state, Msg::ConfirmationAnswered(true));
    assert!(effects.is_empty());
    assert_eq!(row_ids(&state), vec!["A", "Y", "B", "Z"]);
}
