//! Role-based abilities
//!
//! A role maps to a static list of `(action, subject)` grants. `manage` is the
//! wildcard action and `all` the wildcard subject; anything not granted is
//! denied.

use serde::{Deserialize, Serialize};

use super::superadmin::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Manage,
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "all")]
    All,
    Superadmin,
    Student,
    Book,
    Loan,
}

/// A single grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub action: Action,
    pub subject: Subject,
}

impl Rule {
    pub const fn new(action: Action, subject: Subject) -> Self {
        Self { action, subject }
    }

    fn matches(&self, action: Action, subject: Subject) -> bool {
        (self.action == Action::Manage || self.action == action)
            && (self.subject == Subject::All || self.subject == subject)
    }
}

const SUPERADMIN_RULES: &[Rule] = &[Rule::new(Action::Manage, Subject::All)];

// Operators may browse the student directory and nothing else.
const OPERATOR_RULES: &[Rule] = &[Rule::new(Action::Read, Subject::Student)];

/// Permission matrix, one entry per role
pub const PERMISSIONS: &[(Role, &[Rule])] = &[
    (Role::Superadmin, SUPERADMIN_RULES),
    (Role::Operator, OPERATOR_RULES),
];

/// Abilities of one principal, built fresh on every request
#[derive(Debug, Clone, Copy)]
pub struct Ability {
    rules: &'static [Rule],
}

impl Ability {
    pub fn for_role(role: Role) -> Self {
        let rules = PERMISSIONS
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, rules)| *rules)
            .unwrap_or(&[]);
        Self { rules }
    }

    pub fn can(&self, action: Action, subject: Subject) -> bool {
        self.rules.iter().any(|rule| rule.matches(action, subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: [Action; 5] = [
        Action::Manage,
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
    ];
    const SUBJECTS: [Subject; 5] = [
        Subject::All,
        Subject::Superadmin,
        Subject::Student,
        Subject::Book,
        Subject::Loan,
    ];

    #[test]
    fn test_superadmin_can_do_everything() {
        let ability = Ability::for_role(Role::Superadmin);
        for action in ACTIONS {
            for subject in SUBJECTS {
                assert!(ability.can(action, subject), "{:?} {:?}", action, subject);
            }
        }
    }

    #[test]
    fn test_operator_reads_students_only() {
        let ability = Ability::for_role(Role::Operator);
        assert!(ability.can(Action::Read, Subject::Student));

        assert!(!ability.can(Action::Manage, Subject::Student));
        assert!(!ability.can(Action::Update, Subject::Student));
        assert!(!ability.can(Action::Delete, Subject::Student));
        assert!(!ability.can(Action::Read, Subject::All));
    }

    #[test]
    fn test_operator_locked_out_of_books_loans_and_admins() {
        let ability = Ability::for_role(Role::Operator);
        for action in ACTIONS {
            for subject in [Subject::Book, Subject::Loan, Subject::Superadmin] {
                assert!(!ability.can(action, subject), "{:?} {:?}", action, subject);
            }
        }
    }

    #[test]
    fn test_rule_matching() {
        let rule = Rule::new(Action::Read, Subject::Book);
        assert!(rule.matches(Action::Read, Subject::Book));
        assert!(!rule.matches(Action::Manage, Subject::Book));
        assert!(!rule.matches(Action::Read, Subject::Loan));

        let wildcard = Rule::new(Action::Manage, Subject::All);
        assert!(wildcard.matches(Action::Delete, Subject::Loan));
    }

    #[test]
    fn test_no_rules_means_deny() {
        let ability = Ability { rules: &[] };
        assert!(!ability.can(Action::Read, Subject::Student));
    }

    #[test]
    fn test_every_role_has_a_permission_entry() {
        for role in [Role::Superadmin, Role::Operator] {
            assert!(PERMISSIONS.iter().any(|(r, _)| *r == role));
        }
    }
}
