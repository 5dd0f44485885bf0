//! Facet Index: distinct option values per facet.

use std::collections::HashSet;

use serde::Serialize;
use story_core::{FacetName, Record};

/// Option lists for the three selection controls, each in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub program: Vec<String>,
    pub company: Vec<String>,
    /// Period display keys, e.g. `"March 2024"`.
    pub month: Vec<String>,
}

impl FacetOptions {
    #[must_use]
    pub fn get(&self, facet: FacetName) -> &[String] {
        match facet {
            FacetName::Program => &self.program,
            FacetName::Company => &self.company,
            FacetName::Month => &self.month,
        }
    }

    #[must_use]
    pub fn contains(&self, facet: FacetName, value: &str) -> bool {
        self.get(facet).iter().any(|v| v == value)
    }

    fn get_mut(&mut self, facet: FacetName) -> &mut Vec<String> {
        match facet {
            FacetName::Program => &mut self.program,
            FacetName::Company => &mut self.company,
            FacetName::Month => &mut self.month,
        }
    }
}

/// Collect the distinct values of every facet. Malformed records contribute
/// nothing.
pub fn derive_facets<'a, I>(records: I) -> FacetOptions
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut options = FacetOptions::default();
    let mut seen: [HashSet<String>; 3] = Default::default();

    for record in records {
        if !record.is_well_formed() {
            continue;
        }
        for (facet, seen) in FacetName::ALL.into_iter().zip(seen.iter_mut()) {
            if let Some(value) = record.facet_value(facet) {
                if seen.insert(value.clone()) {
                    options.get_mut(facet).push(value);
                }
            }
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use story_core::RecordId;

    fn record(id: u32, program: &str, company: &str, month: &str) -> Record {
        Record {
            id: Some(RecordId::new(id.to_string())),
            program_detail: Some(program.into()),
            company_name: Some(company.into()),
            month: Some(month.into()),
            ..Record::default()
        }
    }

    #[test]
    fn distinct_values_in_first_seen_order() {
        let records = vec![
            record(1, "UX Design", "Globex", "2024-03-05T10:00:00Z"),
            record(2, "Data Analytics", "Acme", "2024-03-20"),
            record(3, "UX Design", "Acme", "2023-12-01"),
            record(4, "Cloud", "acme", "2024-03-31T23:59:59Z"),
        ];
        let options = derive_facets(&records);
        assert_eq!(options.program, vec!["UX Design", "Data Analytics", "Cloud"]);
        // No case folding.
        assert_eq!(options.company, vec!["Globex", "Acme", "acme"]);
        assert_eq!(options.month, vec!["March 2024", "December 2023"]);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let mut no_month = record(1, "Ghost Program", "Ghost Co", "not a date");
        no_month.month = None;
        let bad_date = record(2, "Ghost Program", "Ghost Co", "soon");
        let ok = record(3, "Cloud", "Initech", "2024-01-15");
        let options = derive_facets(&[no_month, bad_date, ok]);
        assert_eq!(options.program, vec!["Cloud"]);
        assert_eq!(options.company, vec!["Initech"]);
        assert!(options.contains(FacetName::Month, "January 2024"));
    }

    #[test]
    fn empty_input_has_empty_lists() {
        assert_eq!(derive_facets(&Vec::<Record>::new()), FacetOptions::default());
    }
}
