//! The check that guards the hand-off from the wizard to the review page.

use common::model::draft::Draft;
use common::model::template::Template;

use super::sequencer::{AddressEntry, StepSequencer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Complete,
    /// The first field still without a value.
    Pending(usize),
}

/// Every field has a value and the recipient is known. A draft with all
/// fields but no recipient sends the user back to the recipient step.
pub fn completion(sequencer: &StepSequencer, draft: &Draft) -> Completion {
    let unfilled = (0..sequencer.fields().len()).find(|&i| !sequencer.is_filled(i, draft));
    match unfilled {
        Some(index) => Completion::Pending(index),
        None if draft.recipient.is_none() => Completion::Pending(0),
        None => Completion::Complete,
    }
}

pub fn is_complete(template: &Template, draft: &Draft) -> bool {
    let sequencer = StepSequencer::new(template, AddressEntry::default());
    completion(&sequencer, draft) == Completion::Complete
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::template;
    use common::model::template::TemplateType;

    #[test]
    fn needs_every_placeholder_and_recipient() {
        let template = template("t", TemplateType::Sms, "((one)) ((two))");
        let mut draft = Draft::new();
        draft.insert("phone number", "0612345678");
        draft.insert("one", "1");
        assert!(!is_complete(&template, &draft));

        draft.insert("Two", "");
        assert!(!is_complete(&template, &draft));

        draft.recipient = Some("0612345678".to_string());
        assert!(is_complete(&template, &draft));
    }

    #[test]
    fn missing_recipient_points_at_first_step() {
        let template = template("t", TemplateType::Email, "((naam))");
        let sequencer = StepSequencer::new(&template, AddressEntry::Block);
        let mut draft = Draft::new();
        draft.insert("e-mailadres", "a@b.nl");
        draft.insert("naam", "Jan");
        assert_eq!(completion(&sequencer, &draft), Completion::Pending(0));
    }
}
