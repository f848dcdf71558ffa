use std::{cell::RefCell, rc::Rc};

use caret::math::Accuracy;
use caret::persistence::MemoryStore;
use caret::{
    Caret, Configuration, Ending, FailureReason, KeyInput, Keystroke, Mode, Outcome, Session,
    SessionController, UserId, WordList,
};

fn controller(word: &str, mode: Mode) -> (SessionController, Rc<RefCell<MemoryStore>>) {
    let store = Rc::new(RefCell::new(MemoryStore::default()));
    let controller = SessionController::builder(WordList::new("fixed", [word]))
        .with_identity(Some(UserId::new("typist")))
        .with_store(Rc::clone(&store))
        .start(mode)
        .unwrap();
    (controller, store)
}

fn type_text(controller: &mut SessionController, text: &str) -> Vec<Keystroke> {
    text.chars()
        .map(|c| controller.handle_key_event(KeyInput::from(c)))
        .collect()
}

#[test]
fn time_mode_net_wpm_after_countdown() {
    let (mut controller, store) = controller("apple", Mode::time(30));
    type_text(&mut controller, &"apple ".repeat(25));

    for _ in 0..30 {
        controller.tick();
    }

    let session = controller.session();
    assert_eq!(session.ending(), Some(Ending::TimeUp));
    assert_eq!(session.counters().correct_char, 125);
    assert_eq!(session.counters().correct_word, 25);

    let result = controller.result().unwrap();
    assert_eq!(result.elapsed, 30);
    assert_eq!(result.wpm, 50);
    assert_eq!(result.raw_wpm, 50);
    assert_eq!(result.samples.len(), 30);
    assert_eq!(store.borrow().results().len(), 1);
}

#[test]
fn words_mode_ends_on_last_word() {
    let (mut controller, store) = controller("apple", Mode::words(10));
    let text = vec!["apple"; 10].join(" ");
    let keystrokes = type_text(&mut controller, &text);

    assert_eq!(keystrokes.len(), text.chars().count());
    assert_eq!(controller.session().ending(), Some(Ending::Completed));
    assert_eq!(controller.session().counters().correct_word, 10);
    assert_eq!(controller.session().counters().completed_words, 10);

    // Anything after the last word is ignored
    assert_eq!(
        controller.handle_key_event(KeyInput::Space),
        Keystroke::Ignored
    );
    assert_eq!(store.borrow().results().len(), 1);
}

#[test]
fn backspace_into_clean_word_rejected() {
    let (mut controller, _) = controller("apple", Mode::time(30));
    type_text(&mut controller, "apple ");

    let keystroke = controller.handle_key_event(KeyInput::Backspace);
    assert_eq!(keystroke, Keystroke::Rejected);
    assert_eq!(controller.session().grid().caret(), Caret::new(1, 0));
}

#[test]
fn extra_character_removed_by_backspace() {
    let (mut controller, _) = controller("apple", Mode::time(30));
    type_text(&mut controller, "applex");
    assert_eq!(controller.session().grid().get_word(0).unwrap().len(), 6);

    controller.handle_key_event(KeyInput::Backspace);
    let word = controller.session().grid().get_word(0).unwrap();
    assert_eq!(word.len(), word.original_len());
    assert_eq!(word.text(), "apple");
    assert!(!word.has_error());
}

#[test]
fn words_mode_inactivity_fails() {
    let (mut controller, store) = controller("apple", Mode::words(25));
    type_text(&mut controller, "app");

    for _ in 0..29 {
        controller.tick();
    }
    assert!(controller.session().is_running());

    controller.tick();
    assert_eq!(
        controller.session().ending(),
        Some(Ending::Failed(FailureReason::Inactivity))
    );

    let result = controller.result().unwrap();
    assert_eq!(result.outcome, Outcome::Failed(FailureReason::Inactivity));
    assert!(result.afk);
    assert!(store.borrow().results().is_empty());
}

#[test]
fn words_mode_time_limit_fails() {
    let config = Configuration {
        words_time_limit_seconds: 10,
        ..Configuration::default()
    };
    let mut controller = SessionController::builder(WordList::new("fixed", ["apple"]))
        .with_configuration(config)
        .start(Mode::words(50))
        .unwrap();

    for second in 0..10 {
        type_text(&mut controller, "a");
        assert!(controller.session().is_running(), "ended after {second}s");
        controller.tick();
    }

    assert_eq!(
        controller.session().ending(),
        Some(Ending::Failed(FailureReason::TimeLimit))
    );
}

#[test]
fn printable_keystrokes_are_all_counted() {
    let words = ["alpha", "beta", "gamma", "delta"];
    let mut session = Session::new(Mode::time(60), &words, &Configuration::default()).unwrap();

    let script = "alpah\u{8}\u{8}ha betax gam\u{8}\u{8}\u{8} xyz delta\u{8}\u{8}ta alpha";
    let mut printable = 0;
    for c in script.chars() {
        let input = KeyInput::from(c);
        if let KeyInput::Char(_) = input {
            printable += 1;
        }
        session.handle_key(input);
    }

    let counters = session.counters();
    assert_eq!(
        counters.correct_char + counters.incorrect_char + counters.extra_char,
        printable
    );
}

#[test]
fn finalize_twice_saves_once() {
    let (mut controller, store) = controller("go", Mode::words(1));
    type_text(&mut controller, "go");

    let first = controller.finalize().cloned();
    let second = controller.finalize().cloned();

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(store.borrow().results().len(), 1);
}

#[test]
fn stored_accuracy_reproducible_from_counters() {
    let (mut controller, store) = controller("apple", Mode::words(3));
    type_text(&mut controller, "apxle ap applee\u{8} apple");

    let store = store.borrow();
    let (_, stored) = &store.results()[0];
    let Accuracy(accuracy) = Accuracy::calculate(
        stored.counters.correct_char,
        stored.counters.total_chars(),
    );
    assert_eq!(accuracy, stored.accuracy);
}

#[test]
fn perfect_word_counts_once() {
    let (mut controller, _) = controller("apple", Mode::time(30));
    type_text(&mut controller, "apple");
    let before = *controller.session().counters();

    type_text(&mut controller, " ");
    let after = *controller.session().counters();

    assert_eq!(after.correct_word, before.correct_word + 1);
    assert_eq!(after.missed_char, before.missed_char);
}

#[test]
fn space_at_word_start_changes_nothing() {
    let (mut controller, _) = controller("apple", Mode::time(30));
    type_text(&mut controller, "apple ");
    let counters = *controller.session().counters();
    let caret = controller.session().grid().caret();

    assert_eq!(
        controller.handle_key_event(KeyInput::Space),
        Keystroke::Rejected
    );
    assert_eq!(*controller.session().counters(), counters);
    assert_eq!(controller.session().grid().caret(), caret);
}

#[test]
fn afk_flag_survives_returning_to_the_keyboard() {
    let (mut controller, store) = controller("hi", Mode::words(2));
    type_text(&mut controller, "h");

    for _ in 0..6 {
        controller.tick();
    }
    assert!(controller.session().is_afk());

    type_text(&mut controller, "i hi");
    assert!(!controller.session().is_afk());

    let result = controller.result().unwrap();
    assert_eq!(result.outcome, Outcome::Passed);
    assert!(result.afk);
    assert_eq!(store.borrow().results().len(), 1);
}
