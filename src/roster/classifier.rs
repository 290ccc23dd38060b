//! Roster partitioning into candidate pools.

use crate::model::{Participant, Sex};

/// Candidate pools derived from one roster snapshot.
///
/// Every pool keeps the relative order of the input roster, which is what
/// makes first-fit selection reproducible.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Buckets<'a> {
    /// Males holding the elder or ministerial-servant tag.
    pub qualified_males: Vec<&'a Participant>,
    /// Male publishers without a privilege tag.
    pub male_publishers: Vec<&'a Participant>,
    pub female_publishers: Vec<&'a Participant>,
    pub elders: Vec<&'a Participant>,
    pub ministerial_servants: Vec<&'a Participant>,
    /// The whole roster, input order.
    pub all: Vec<&'a Participant>,
}

impl<'a> Buckets<'a> {
    /// Publisher pool for the given sex.
    pub fn publishers_of(&self, sex: Sex) -> &[&'a Participant] {
        match sex {
            Sex::Male => &self.male_publishers,
            Sex::Female => &self.female_publishers,
        }
    }
}

/// Partitions a roster into [`Buckets`].
///
/// A male with a privilege tag goes to the matching privilege bucket(s) and
/// to `qualified_males`; other males go to `male_publishers` when they are
/// publishers. Females who are publishers go to `female_publishers`.
/// Non-publishers only appear in `all`.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Participant, Privilege, Sex};
/// use u_assign::roster::classify;
///
/// let roster = vec![
///     Participant::new("1", "Ana", Sex::Female),
///     Participant::new("2", "Paulo", Sex::Male).with_privilege(Privilege::Elder),
///     Participant::new("3", "Tiago", Sex::Male),
/// ];
/// let buckets = classify(&roster);
/// assert_eq!(buckets.qualified_males.len(), 1);
/// assert_eq!(buckets.male_publishers[0].name, "Tiago");
/// assert_eq!(buckets.all.len(), 3);
/// ```
pub fn classify(participants: &[Participant]) -> Buckets<'_> {
    let mut buckets = Buckets {
        all: participants.iter().collect(),
        ..Buckets::default()
    };

    for p in participants {
        match p.sex {
            Sex::Male => {
                let elder = p.is_elder();
                let servant = p.is_ministerial_servant();
                if elder {
                    buckets.elders.push(p);
                }
                if servant {
                    buckets.ministerial_servants.push(p);
                }
                if elder || servant {
                    buckets.qualified_males.push(p);
                } else if p.publisher {
                    buckets.male_publishers.push(p);
                }
            }
            Sex::Female => {
                if p.publisher {
                    buckets.female_publishers.push(p);
                }
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Privilege;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new("m1", "M1", Sex::Male),
            Participant::new("f1", "F1", Sex::Female),
            Participant::new("e1", "E1", Sex::Male).with_privilege(Privilege::Elder),
            Participant::new("s1", "S1", Sex::Male).with_privilege(Privilege::MinisterialServant),
            Participant::new("m2", "M2", Sex::Male).with_publisher(false),
            Participant::new("f2", "F2", Sex::Female),
            Participant::new("f3", "F3", Sex::Female).with_publisher(false),
        ]
    }

    fn ids(ps: &[&Participant]) -> Vec<String> {
        ps.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_buckets() {
        let roster = roster();
        let b = classify(&roster);

        assert_eq!(ids(&b.qualified_males), vec!["e1", "s1"]);
        assert_eq!(ids(&b.male_publishers), vec!["m1"]);
        assert_eq!(ids(&b.female_publishers), vec!["f1", "f2"]);
        assert_eq!(ids(&b.elders), vec!["e1"]);
        assert_eq!(ids(&b.ministerial_servants), vec!["s1"]);
        assert_eq!(b.all.len(), 7);
    }

    #[test]
    fn test_all_preserves_input_order() {
        let roster = roster();
        let b = classify(&roster);
        let expected: Vec<String> = roster.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids(&b.all), expected);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let roster = roster();
        assert_eq!(classify(&roster), classify(&roster));
    }

    #[test]
    fn test_empty_roster() {
        let b = classify(&[]);
        assert!(b.all.is_empty());
        assert!(b.qualified_males.is_empty());
    }

    #[test]
    fn test_elder_and_servant_counted_once_as_qualified() {
        let roster = vec![Participant::new("x", "X", Sex::Male)
            .with_privilege(Privilege::Elder)
            .with_privilege(Privilege::MinisterialServant)];
        let b = classify(&roster);
        assert_eq!(b.qualified_males.len(), 1);
        assert_eq!(b.elders.len(), 1);
        assert_eq!(b.ministerial_servants.len(), 1);
    }

    #[test]
    fn test_female_privilege_ignored() {
        let roster = vec![Participant::new("f", "F", Sex::Female).with_privilege(Privilege::Elder)];
        let b = classify(&roster);
        assert!(b.qualified_males.is_empty());
        assert!(b.elders.is_empty());
        assert_eq!(ids(&b.female_publishers), vec!["f"]);
    }
}
