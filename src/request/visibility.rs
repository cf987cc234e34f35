//! Conditional field groups

use super::model::{Field, RequestForm};
use std::collections::BTreeSet;

/// A cluster of fields shown together when its controlling flag is `true`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisibilityGroup {
    DataLoad,
    Integration,
    Downtime,
    Attachments,
}

impl VisibilityGroup {
    pub const ALL: [VisibilityGroup; 4] = [
        VisibilityGroup::DataLoad,
        VisibilityGroup::Integration,
        VisibilityGroup::Downtime,
        VisibilityGroup::Attachments,
    ];

    /// The flag that opens this group
    pub fn controlling_field(self) -> Field {
        match self {
            VisibilityGroup::DataLoad => Field::IncludesDataLoad,
            VisibilityGroup::Integration => Field::SystemIntegration,
            VisibilityGroup::Downtime => Field::RequiresDowntime,
            VisibilityGroup::Attachments => Field::IncludesAttachments,
        }
    }

    pub fn members(self) -> &'static [Field] {
        match self {
            VisibilityGroup::DataLoad => {
                &[Field::DataType, Field::DataSource, Field::DataFrequency]
            }
            VisibilityGroup::Integration => &[Field::IntegratedSystems],
            VisibilityGroup::Downtime => &[Field::EstimatedDowntime],
            VisibilityGroup::Attachments => &[Field::Attachments],
        }
    }

    /// Group a field belongs to, `None` for always-visible fields
    pub fn of(field: Field) -> Option<VisibilityGroup> {
        Self::ALL
            .into_iter()
            .find(|group| group.members().contains(&field))
    }

    pub fn is_open(self, form: &RequestForm) -> bool {
        form.is_set(self.controlling_field())
    }
}

/// Groups visible for the current snapshot
pub fn visible_groups(form: &RequestForm) -> BTreeSet<VisibilityGroup> {
    VisibilityGroup::ALL
        .into_iter()
        .filter(|group| group.is_open(form))
        .collect()
}

fn is_visible_in(open: &BTreeSet<VisibilityGroup>, field: Field) -> bool {
    VisibilityGroup::of(field).is_none_or(|group| open.contains(&group))
}

/// Visible fields in declaration order
pub fn visible_fields(form: &RequestForm) -> Vec<Field> {
    let open = visible_groups(form);
    Field::ALL
        .into_iter()
        .filter(|field| is_visible_in(&open, *field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_form_has_no_open_groups() {
        let form = RequestForm::new();
        assert!(visible_groups(&form).is_empty());
        assert_eq!(visible_fields(&form).len(), Field::ALL.len() - 6);
    }

    #[test]
    fn test_each_flag_opens_its_group_only() {
        for group in VisibilityGroup::ALL {
            let mut form = RequestForm::new();
            form.set_flag(group.controlling_field(), true);
            assert_eq!(visible_groups(&form), BTreeSet::from([group]));
        }
    }

    #[test]
    fn test_false_flag_keeps_group_closed() {
        let mut form = RequestForm::new();
        form.set_flag(Field::IncludesDataLoad, false);
        assert!(!visible_fields(&form).contains(&Field::DataSource));
    }

    #[test]
    fn test_unrelated_fields_do_not_affect_visibility() {
        let mut form = RequestForm::new();
        form.set_flag(Field::MetadataUpdate, true);
        form.set_flag(Field::AffectsPortal, true);
        form.data_source = "stale".to_string();
        assert!(visible_groups(&form).is_empty());
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let mut form = RequestForm::new();
        form.set_flag(Field::SystemIntegration, true);
        form.set_flag(Field::IncludesAttachments, true);
        assert_eq!(visible_groups(&form), visible_groups(&form));
        assert_eq!(visible_fields(&form), visible_fields(&form));
    }

    #[test]
    fn test_visible_fields_follow_declaration_order() {
        let mut form = RequestForm::new();
        form.set_flag(Field::IncludesDataLoad, true);
        let fields = visible_fields(&form);
        let flag = fields.iter().position(|f| *f == Field::IncludesDataLoad).unwrap();
        assert_eq!(
            &fields[flag + 1..flag + 4],
            &[Field::DataType, Field::DataSource, Field::DataFrequency]
        );
    }

    #[test]
    fn test_group_membership() {
        assert_eq!(VisibilityGroup::of(Field::Attachments), Some(VisibilityGroup::Attachments));
        assert_eq!(VisibilityGroup::of(Field::Email), None);
        assert_eq!(VisibilityGroup::of(Field::IncludesDataLoad), None);
    }
}
