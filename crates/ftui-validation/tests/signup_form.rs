#![forbid(unsafe_code)]

//! End-to-end sign-up form: a required name, a required birthday, and a
//! terms-of-service check box gating a submit button.

use std::rc::Rc;

use ftui_validation::headless::{Button, CheckBox, DatePicker, Label, TextBox};
use ftui_validation::{ComponentEvent, DateField, ErrorFeedback, TextField, Validator};

type Date = (i32, u8, u8);

#[derive(Debug, PartialEq, Eq)]
enum Submit {
    Accepted,
    ErrorsShown,
}

struct SignupForm {
    name_box: Rc<TextBox>,
    name_missing_lbl: Rc<Label>,
    birthday_date: Rc<DatePicker<Date>>,
    birthday_missing_lbl: Rc<Label>,
    tos_accept_cbx: Rc<CheckBox>,
    tos_missing_lbl: Rc<Label>,
    submit_btn: Rc<Button>,
    validator: Validator,
}

impl SignupForm {
    fn new(gate_submit: bool) -> Self {
        let form = Self {
            name_box: Rc::new(TextBox::new("name_box")),
            name_missing_lbl: Rc::new(Label::new("Please enter your name")),
            birthday_date: Rc::new(DatePicker::new("birthday_date")),
            birthday_missing_lbl: Rc::new(Label::new("Please enter your birthday")),
            tos_accept_cbx: Rc::new(CheckBox::new("tos_accept_cbx")),
            tos_missing_lbl: Rc::new(Label::new("You must accept the terms")),
            submit_btn: Rc::new(Button::new("Sign up")),
            validator: Validator::new(),
        };

        form.validator
            .require_text(&form.name_box, ErrorFeedback::indicator(&form.name_missing_lbl))
            .expect("text box emits text events");
        form.validator
            .register(
                &form.birthday_date,
                [ComponentEvent::DateChanged],
                |picker: &DatePicker<Date>| picker.date().is_some(),
                ErrorFeedback::indicator(&form.birthday_missing_lbl),
            )
            .expect("date picker emits date events");
        form.validator
            .require_checked(&form.tos_accept_cbx, ErrorFeedback::indicator(&form.tos_missing_lbl))
            .expect("check box emits toggle events");
        if gate_submit {
            form.validator.enable_when_valid(&form.submit_btn);
        }
        form
    }

    fn submit_click(&self) -> Submit {
        if self.validator.is_valid() {
            Submit::Accepted
        } else {
            self.validator.show_all_errors();
            Submit::ErrorsShown
        }
    }

    fn labels_visible(&self) -> [bool; 3] {
        [
            self.name_missing_lbl.is_visible(),
            self.birthday_missing_lbl.is_visible(),
            self.tos_missing_lbl.is_visible(),
        ]
    }
}

#[test]
fn fresh_form_is_clean_but_invalid() {
    let form = SignupForm::new(false);
    assert_eq!(form.labels_visible(), [false, false, false]);
    assert!(!form.validator.is_valid());
    assert_eq!(form.validator.tracked_count(), 3);
    assert!(form.submit_btn.is_enabled());
}

#[test]
fn submitting_incomplete_form_reveals_every_missing_field() {
    let form = SignupForm::new(false);
    form.name_box.type_text("Ada Lovelace");

    assert_eq!(form.submit_click(), Submit::ErrorsShown);
    assert_eq!(form.labels_visible(), [false, true, true]);
}

#[test]
fn completing_the_form_clears_errors_and_accepts() {
    let form = SignupForm::new(false);
    assert_eq!(form.submit_click(), Submit::ErrorsShown);
    assert_eq!(form.labels_visible(), [true, true, true]);

    form.name_box.type_text("Ada Lovelace");
    form.birthday_date.pick((1815, 12, 10));
    form.tos_accept_cbx.toggle();

    assert_eq!(form.labels_visible(), [false, false, false]);
    assert_eq!(form.submit_click(), Submit::Accepted);
}

#[test]
fn gated_submit_tracks_form_state() {
    let form = SignupForm::new(true);
    assert!(!form.submit_btn.is_enabled());

    form.name_box.type_text("Ada Lovelace");
    form.birthday_date.pick((1815, 12, 10));
    assert!(!form.submit_btn.is_enabled());

    form.tos_accept_cbx.toggle();
    assert!(form.submit_btn.is_enabled());

    form.tos_accept_cbx.toggle();
    assert!(!form.submit_btn.is_enabled());
    assert!(form.tos_missing_lbl.is_visible());
}

#[test]
fn focus_loss_on_untouched_name_shows_its_error_only() {
    let form = SignupForm::new(true);
    form.name_box.blur();
    assert_eq!(form.labels_visible(), [true, false, false]);
}

#[test]
fn inline_validation_from_application_handler() {
    let form = SignupForm::new(true);
    let nickname = Rc::new(TextBox::new("nickname_box"));
    let nickname_lbl = Rc::new(Label::new("Nickname too long"));

    // An application-owned change handler that validates inline.
    nickname.set_text("a nickname that is far too long");
    let ok = form.validator.validate_now(
        &nickname,
        |tb: &TextBox| tb.text().is_none_or(|t| t.chars().count() <= 12),
        ErrorFeedback::indicator(&nickname_lbl),
    );
    assert!(!ok);
    assert!(nickname_lbl.is_visible());
    assert_eq!(form.validator.check_count(), 4);

    nickname.set_text("ada");
    form.name_box.type_text("Ada Lovelace");
    form.birthday_date.pick((1815, 12, 10));
    form.tos_accept_cbx.toggle();
    // The nickname check only re-runs on replay.
    assert!(!form.submit_btn.is_enabled());
    assert_eq!(form.submit_click(), Submit::ErrorsShown);
    assert!(!nickname_lbl.is_visible());
    assert!(form.submit_btn.is_enabled());
    assert_eq!(form.submit_click(), Submit::Accepted);
}
