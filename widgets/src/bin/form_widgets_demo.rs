// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Replays a sequence of key presses against a widget and prints what happened after
//! each one. Eg:
//!
//! ```text
//! form-widgets-demo --options "Apple,!Banana,Cherry" --keys "down,down,enter"
//! ```

use std::{cell::RefCell, rc::Rc};

use clap::{Parser, ValueEnum};
use form_widgets::{CommonResult, EventPropagation, KeyPress, ListWidget, ListenerEvent,
                   OptionList, RecordingListener, SegmentedControl, SelectOption, Switch,
                   TracingConfig, WidgetsConfig, try_initialize_logging_global};

type EventLog = Rc<RefCell<Vec<ListenerEvent<String>>>>;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum WidgetKind {
    List,
    Segmented,
    Switch,
}

#[derive(Debug, Parser)]
#[command(bin_name = "form-widgets-demo")]
#[command(about = "Replay key presses against a form widget and print the focus and selection trace")]
#[command(version)]
#[command(next_line_help = true)]
pub struct CLIArg {
    #[arg(
        long,
        short = 'o',
        default_value = "Apple,!Banana,Cherry",
        help = "Comma separated option labels. Prefix a label with `!` to disable it"
    )]
    pub options: String,

    #[arg(
        long,
        short = 'v',
        help = "Initially selected value. For the switch widget, `true` or `false`"
    )]
    pub value: Option<String>,

    #[arg(
        long,
        short = 'k',
        default_value = "down,down,enter",
        help = "Comma separated key names, eg: `down,up,enter,space,ctrl+enter`"
    )]
    pub keys: String,

    #[arg(long, short = 'w', value_enum, default_value_t = WidgetKind::List)]
    pub widget: WidgetKind,

    #[arg(long, short = 'c', help = "JSON file with widget defaults")]
    pub config: Option<String>,

    #[arg(long, short = 'l', help = "Log debug output to this file")]
    pub log_file: Option<String>,
}

fn main() -> CommonResult<()> {
    let cli_arg = CLIArg::parse();

    if let Some(log_file) = cli_arg.log_file.as_ref() {
        try_initialize_logging_global(TracingConfig::new_file(Some(log_file.clone())))?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let config = match cli_arg.config.as_ref() {
        Some(path) => WidgetsConfig::try_load_from_path(path)?,
        None => WidgetsConfig::default(),
    };

    let key_presses = parse_key_presses(&cli_arg.keys)?;

    match cli_arg.widget {
        WidgetKind::List => replay_list(&cli_arg, config, &key_presses),
        WidgetKind::Segmented => replay_segmented(&cli_arg, config, &key_presses),
        WidgetKind::Switch => replay_switch(&cli_arg, &key_presses),
    }

    Ok(())
}

fn replay_list(cli_arg: &CLIArg, config: WidgetsConfig, key_presses: &[(String, KeyPress)]) {
    let (listener, log) = RecordingListener::new_with_log();
    let mut list = ListWidget::new(
        parse_option_list(&cli_arg.options),
        cli_arg.value.clone(),
        config.list,
    )
    .with_listener(listener);
    list.on_focus_in();

    for (name, key_press) in key_presses {
        let result = list.handle_key(*key_press);
        let events = drain_and_apply(&log, |value| list.set_value(Some(value)));
        print_step(name, result, list.focused_index(), list.selected_value(), &events);
    }
}

fn replay_segmented(
    cli_arg: &CLIArg,
    config: WidgetsConfig,
    key_presses: &[(String, KeyPress)],
) {
    let (listener, log) = RecordingListener::new_with_log();
    let mut control =
        SegmentedControl::new(parse_option_list(&cli_arg.options), cli_arg.value.clone())
            .with_policy(config.options_changed_policy)
            .with_listener(listener);
    control.on_focus();

    for (name, key_press) in key_presses {
        let result = control.handle_key(*key_press);
        let events = drain_and_apply(&log, |value| control.set_value(Some(value)));
        print_step(
            name,
            result,
            control.focused_index(),
            control.selected_value(),
            &events,
        );
    }
}

fn replay_switch(cli_arg: &CLIArg, key_presses: &[(String, KeyPress)]) {
    let requested = Rc::new(RefCell::new(None));
    let requested_clone = requested.clone();
    let initial = cli_arg.value.as_deref() == Some("true");
    let mut switch =
        Switch::new(initial).with_on_change(move |it| *requested_clone.borrow_mut() = Some(it));

    for (name, key_press) in key_presses {
        let result = switch.handle_key(*key_press);
        if let Some(value) = requested.borrow_mut().take() {
            switch.set_value(value);
        }
        println!("{name:>12} -> {result:?}, value: {}", switch.value());
    }
}

/// Takes the recorded events, and plays the caller's part: every selection request is
/// accepted right away.
fn drain_and_apply(
    log: &EventLog,
    mut apply_selection: impl FnMut(String),
) -> Vec<ListenerEvent<String>> {
    let events: Vec<_> = log.borrow_mut().drain(..).collect();
    for event in &events {
        if let ListenerEvent::SelectionChange(value) = event {
            apply_selection(value.clone());
        }
    }
    events
}

fn print_step(
    name: &str,
    result: EventPropagation,
    maybe_focused_index: Option<usize>,
    maybe_selected_value: Option<&String>,
    events: &[ListenerEvent<String>],
) {
    println!(
        "{name:>12} -> {result:?}, focused: {maybe_focused_index:?}, selected: \
         {maybe_selected_value:?}, events: {events:?}"
    );
}

/// `"A,!B,C"` -> `[A, B (disabled), C]`. The label doubles as the value.
fn parse_option_list(input: &str) -> OptionList<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|it| !it.is_empty())
        .map(|it| match it.strip_prefix('!') {
            Some(label) => SelectOption::new(label.to_string(), label).with_disabled(true),
            None => SelectOption::new(it.to_string(), it),
        })
        .collect()
}

fn parse_key_presses(input: &str) -> CommonResult<Vec<(String, KeyPress)>> {
    let mut acc = vec![];
    for name in input.split(',').map(str::trim).filter(|it| !it.is_empty()) {
        acc.push((name.to_string(), name.parse::<KeyPress>()?));
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use form_widgets::{SpecialKey, WidgetsError, assert_eq2, keypress};

    use super::*;

    #[test]
    fn test_parse_option_list() {
        let options = parse_option_list("Apple, !Banana ,Cherry,");
        assert_eq2!(options.len(), 3);
        assert_eq2!(
            options.get(1),
            Some(&SelectOption::new("Banana".to_string(), "Banana").with_disabled(true))
        );
    }

    #[test]
    fn test_parse_key_presses() {
        let keys = parse_key_presses("down, space").unwrap();
        assert_eq2!(
            keys,
            vec![
                ("down".to_string(), keypress!(@special SpecialKey::Down)),
                ("space".to_string(), keypress!(@char ' ')),
            ]
        );

        let report = parse_key_presses("down,sideways").unwrap_err();
        assert!(matches!(
            report.downcast_ref::<WidgetsError>(),
            Some(WidgetsError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_drain_and_apply_accepts_selection() {
        let log: EventLog = Rc::new(RefCell::new(vec![
            ListenerEvent::FocusChange(Some(2)),
            ListenerEvent::SelectionChange("Cherry".to_string()),
        ]));
        let mut applied = vec![];
        let events = drain_and_apply(&log, |it| applied.push(it));
        assert_eq2!(events.len(), 2);
        assert_eq2!(applied, vec!["Cherry".to_string()]);
        assert!(log.borrow().is_empty());
    }
}
