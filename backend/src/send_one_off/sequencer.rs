use common::model::draft::Draft;
use common::model::template::{
    address_line_keys, is_address_derived, Template, TemplateType, ADDRESS_LINE_COUNT,
};
use common::recipients::postal_address::PostalAddress;
use serde::{Deserialize, Serialize};

use super::gate::{self, Completion};

/// How a letter's address is collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressEntry {
    /// All lines at once on the address page.
    #[default]
    Block,
    /// One step per address line, like any other placeholder.
    LineByLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "line", rename_all = "snake_case")]
pub enum StepKind {
    AddressLine(usize),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub index: usize,
    pub placeholder: String,
    #[serde(flatten)]
    pub kind: StepKind,
}

/// Where a request for a step index should end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// Render this step.
    Show(Step),
    /// Redirect to another step index.
    Goto(usize),
    /// Redirect to the address page.
    Address,
    /// Everything is filled in; hand off to the review page.
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "to", content = "index", rename_all = "snake_case")]
pub enum BackLink {
    Template,
    Address,
    Step(usize),
}

/// Orders the values a template needs and decides, for each request, which
/// step to show.
///
/// Fields run recipient first: the email or phone column, or the six
/// address lines for a letter. Then come the template's own placeholders in
/// order of appearance, leaving out any that name the recipient.
#[derive(Debug, Clone)]
pub struct StepSequencer {
    template_type: TemplateType,
    address_entry: AddressEntry,
    fields: Vec<String>,
}

impl StepSequencer {
    pub fn new(template: &Template, address_entry: AddressEntry) -> Self {
        let template_type = template.template_type;
        let mut fields = template_type.recipient_columns();
        fields.extend(
            template
                .placeholders()
                .into_iter()
                .filter(|name| !template_type.is_recipient_column(name)),
        );
        Self {
            template_type,
            address_entry,
            fields,
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn collects_address_block(&self) -> bool {
        self.template_type == TemplateType::Letter && self.address_entry == AddressEntry::Block
    }

    pub(super) fn is_filled(&self, index: usize, draft: &Draft) -> bool {
        if index == 0 && self.template_type != TemplateType::Letter {
            return self
                .template_type
                .recipient_aliases()
                .iter()
                .any(|alias| draft.contains(alias));
        }
        self.fields
            .get(index)
            .is_some_and(|field| draft.contains(field))
    }

    fn address_resolved(&self, draft: &Draft) -> bool {
        address_line_keys().iter().all(|line| draft.contains(line))
    }

    /// Where to send someone who needs to fill in field `index`.
    fn target(&self, index: usize) -> Position {
        if self.collects_address_block() && index < ADDRESS_LINE_COUNT {
            Position::Address
        } else {
            Position::Goto(index)
        }
    }

    pub fn locate(&self, index: usize, draft: &Draft) -> Position {
        if index >= self.fields.len() {
            return match gate::completion(self, draft) {
                Completion::Complete => Position::Review,
                Completion::Pending(first) => self.target(first),
            };
        }

        if self.collects_address_block() && (index < ADDRESS_LINE_COUNT || !self.address_resolved(draft)) {
            return Position::Address;
        }

        // Letters get postcode from the address; don't ask for it again.
        if self.template_type == TemplateType::Letter
            && is_address_derived(&self.fields[index])
            && draft.contains(&self.fields[index])
        {
            return match self.next_unfilled(index + 1, draft) {
                Some(next) => Position::Goto(next),
                None => self.locate(self.fields.len(), draft),
            };
        }

        let kind = if self.template_type == TemplateType::Letter && index < ADDRESS_LINE_COUNT {
            StepKind::AddressLine(index + 1)
        } else {
            StepKind::Placeholder
        };
        Position::Show(Step {
            index,
            placeholder: self.fields[index].clone(),
            kind,
        })
    }

    fn next_unfilled(&self, from: usize, draft: &Draft) -> Option<usize> {
        (from..self.fields.len()).find(|&i| !self.is_filled(i, draft))
    }

    /// Where to go once step `index` has been answered: the next unfilled
    /// field after it, then any unfilled field before it, then review.
    pub fn next_after(&self, index: usize, draft: &Draft) -> Position {
        if let Some(next) = self.next_unfilled(index + 1, draft) {
            return self.target(next);
        }
        match gate::completion(self, draft) {
            Completion::Complete => Position::Review,
            Completion::Pending(first) => self.target(first),
        }
    }

    /// Stores the answer to `step`. Answering the recipient column sets the
    /// draft's recipient; for letters the recipient is set once every
    /// address line has a value.
    pub fn record(&self, draft: &mut Draft, step: &Step, value: &str) {
        draft.insert(step.placeholder.clone(), value);
        match (self.template_type, step.kind) {
            (TemplateType::Letter, StepKind::AddressLine(_)) if self.address_resolved(draft) => {
                let lines: Vec<&str> = address_line_keys()
                    .iter()
                    .filter_map(|line| draft.get(line))
                    .filter(|line| !line.trim().is_empty())
                    .collect();
                let recipient = PostalAddress::from_lines(lines).as_recipient();
                draft.recipient = Some(recipient);
            }
            (TemplateType::Email | TemplateType::Sms, _) if step.index == 0 => {
                draft.recipient = Some(value.to_string());
            }
            _ => {}
        }
    }

    /// Stores a whole address from the address page, filling every address
    /// line, the postcode and the recipient.
    pub fn apply_address(&self, draft: &mut Draft, address: &PostalAddress) {
        draft.extend(address.as_personalisation());
        draft.recipient = Some(address.as_recipient());
    }

    pub fn back_link(&self, index: usize) -> BackLink {
        if index == 0 {
            return BackLink::Template;
        }
        if self.template_type != TemplateType::Letter {
            return BackLink::Step(index - 1);
        }

        let first_asked = if self.collects_address_block() { ADDRESS_LINE_COUNT } else { 0 };
        let previous = (first_asked..index.min(self.fields.len()))
            .rev()
            .find(|&i| !is_address_derived(&self.fields[i]));
        match previous {
            Some(previous) => BackLink::Step(previous),
            None if self.collects_address_block() => BackLink::Address,
            None => BackLink::Template,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::template;

    fn letter(content: &str) -> StepSequencer {
        StepSequencer::new(&template("t", TemplateType::Letter, content), AddressEntry::Block)
    }

    fn step_index(position: Position) -> usize {
        match position {
            Position::Show(step) => step.index,
            other => panic!("expected a step, got {other:?}"),
        }
    }

    #[test]
    fn sms_fields_put_recipient_first() {
        let sequencer = StepSequencer::new(
            &template("t", TemplateType::Sms, "((one)) ((two)) ((three))"),
            AddressEntry::Block,
        );
        assert_eq!(sequencer.fields(), ["telefoonnummer", "one", "two", "three"]);
    }

    #[test]
    fn recipient_aliases_are_not_asked_twice() {
        let sequencer = StepSequencer::new(
            &template("t", TemplateType::Email, "Hoi ((email address)) ((naam)) ((E-mailadres))"),
            AddressEntry::Block,
        );
        assert_eq!(sequencer.fields(), ["e-mailadres", "naam"]);
    }

    #[test]
    fn letter_fields_start_with_address_lines() {
        let sequencer = letter("((address line 1)) ((name)) ((postcode))");
        assert_eq!(sequencer.fields().len(), ADDRESS_LINE_COUNT + 2);
        assert_eq!(sequencer.fields()[0], "address line 1");
        assert_eq!(sequencer.fields()[6], "name");
        assert_eq!(sequencer.fields()[7], "postcode");
    }

    #[test]
    fn empty_letter_draft_always_goes_to_address() {
        let sequencer = letter("((name))");
        let draft = Draft::new();
        for index in [0, 3, 6, 7, 100] {
            assert_eq!(sequencer.locate(index, &draft), Position::Address);
        }
    }

    #[test]
    fn letter_address_then_free_placeholder() {
        let sequencer = letter(
            "((address line 1)) ((address line 2)) ((address line 3)) \
             ((address line 4)) ((address line 5)) ((address line 6)) ((name))",
        );
        assert_eq!(sequencer.fields().len(), 7);

        let mut draft = Draft::new();
        let address = PostalAddress::new("Jan Jansen\nStraat 1\n1234 AB Den Haag", false);
        sequencer.apply_address(&mut draft, &address);

        let next = sequencer.next_after(ADDRESS_LINE_COUNT - 1, &draft);
        assert_eq!(next, Position::Goto(6));
        match sequencer.locate(6, &draft) {
            Position::Show(step) => {
                assert_eq!(step.placeholder, "name");
                assert_eq!(step.kind, StepKind::Placeholder);
                assert_eq!(sequencer.back_link(6), BackLink::Address);
            }
            other => panic!("expected the name step, got {other:?}"),
        }

        sequencer.record(&mut draft, &Step { index: 6, placeholder: "name".into(), kind: StepKind::Placeholder }, "Jan");
        assert_eq!(sequencer.next_after(6, &draft), Position::Review);
        assert_eq!(gate::completion(&sequencer, &draft), Completion::Complete);
    }

    #[test]
    fn filled_postcode_is_skipped() {
        let sequencer = letter("((postcode)) ((name))");
        let mut draft = Draft::new();
        sequencer.apply_address(
            &mut draft,
            &PostalAddress::new("Jan Jansen\nStraat 1\n1234 AB Den Haag", false),
        );

        assert_eq!(sequencer.locate(6, &draft), Position::Goto(7));
        assert_eq!(sequencer.next_after(5, &draft), Position::Goto(7));
        assert_eq!(sequencer.back_link(7), BackLink::Address);
    }

    #[test]
    fn line_by_line_asks_each_address_line() {
        let sequencer = StepSequencer::new(
            &template("t", TemplateType::Letter, "((name))"),
            AddressEntry::LineByLine,
        );
        let mut draft = Draft::new();
        match sequencer.locate(0, &draft) {
            Position::Show(step) => assert_eq!(step.kind, StepKind::AddressLine(1)),
            other => panic!("expected the first address line, got {other:?}"),
        }

        for (index, line) in ["Jan Jansen", "Straat 1", "1234 AB Den Haag", "", "", ""]
            .into_iter()
            .enumerate()
        {
            let Position::Show(step) = sequencer.locate(index, &draft) else {
                panic!("expected step {index}");
            };
            sequencer.record(&mut draft, &step, line);
        }
        assert_eq!(draft.recipient.as_deref(), Some("Jan Jansen\nStraat 1\n1234 AB  DEN HAAG"));
        assert_eq!(sequencer.next_after(5, &draft), Position::Goto(6));
        assert_eq!(sequencer.back_link(6), BackLink::Step(5));
    }

    #[test]
    fn recipient_step_sets_recipient() {
        let sequencer = StepSequencer::new(
            &template("t", TemplateType::Sms, "((naam))"),
            AddressEntry::Block,
        );
        let mut draft = Draft::new();
        let Position::Show(step) = sequencer.locate(0, &draft) else {
            panic!("expected the recipient step");
        };
        sequencer.record(&mut draft, &step, "0612345678");
        assert_eq!(draft.recipient.as_deref(), Some("0612345678"));
        assert_eq!(sequencer.next_after(0, &draft), Position::Goto(1));
    }

    #[test]
    fn out_of_range_goes_to_first_unfilled_or_review() {
        let sequencer = StepSequencer::new(
            &template("t", TemplateType::Sms, "((one)) ((two))"),
            AddressEntry::Block,
        );
        let mut draft = Draft::new();
        draft.insert("telefoonnummer", "0612345678");
        draft.recipient = Some("0612345678".into());
        draft.insert("one", "1");
        assert_eq!(sequencer.locate(9, &draft), Position::Goto(2));

        draft.insert("two", "2");
        assert_eq!(sequencer.locate(9, &draft), Position::Review);
    }

    #[test]
    fn next_wraps_to_skipped_fields() {
        let sequencer = StepSequencer::new(
            &template("t", TemplateType::Email, "((one)) ((two))"),
            AddressEntry::Block,
        );
        let mut draft = Draft::new();
        draft.insert("two", "2");
        assert_eq!(sequencer.next_after(2, &draft), Position::Goto(0));
        assert_eq!(step_index(sequencer.locate(1, &draft)), 1);
    }

    #[test]
    fn back_links() {
        let sms = StepSequencer::new(
            &template("t", TemplateType::Sms, "((one)) ((two))"),
            AddressEntry::Block,
        );
        assert_eq!(sms.back_link(0), BackLink::Template);
        assert_eq!(sms.back_link(2), BackLink::Step(1));

        let letter = letter("((one)) ((two))");
        assert_eq!(letter.back_link(6), BackLink::Address);
        assert_eq!(letter.back_link(7), BackLink::Step(6));
    }
}
