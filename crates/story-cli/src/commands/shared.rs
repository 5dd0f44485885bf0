use serde::Serialize;
use story_core::{FacetName, Record};
use story_upstream::asset_url;
use story_view::{FacetOptions, FacetSelection, PresenterState};

/// One gallery tile.
#[derive(Debug, Serialize)]
pub struct StoryRow {
    pub id: String,
    pub program: String,
    pub company: String,
    pub month: String,
    pub image: Option<String>,
}

impl StoryRow {
    pub fn from_record(record: &Record, endpoint: &str) -> Self {
        Self {
            id: record.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            program: record.program_detail.clone().unwrap_or_default(),
            company: record.company_name.clone().unwrap_or_default(),
            month: record.facet_value(FacetName::Month).unwrap_or_default(),
            image: record
                .image_ref
                .as_deref()
                .filter(|r| !r.trim().is_empty())
                .map(|r| asset_url(endpoint, r)),
        }
    }
}

pub fn rows<'a>(records: impl Iterator<Item = &'a Record>, endpoint: &str) -> Vec<StoryRow> {
    records.map(|r| StoryRow::from_record(r, endpoint)).collect()
}

/// Gallery state plus the stories to print.
#[derive(Debug, Serialize)]
pub struct GalleryResponse<'a> {
    pub selection: &'a FacetSelection,
    pub matched: usize,
    pub visible: usize,
    pub state: PresenterState,
    pub stories: Vec<StoryRow>,
}

/// One row per facet for table output.
#[derive(Debug, Serialize)]
pub struct FacetRow {
    pub facet: FacetName,
    pub count: usize,
    pub options: Vec<String>,
}

pub fn facet_rows(options: &FacetOptions) -> Vec<FacetRow> {
    FacetName::ALL
        .into_iter()
        .map(|facet| FacetRow {
            facet,
            count: options.get(facet).len(),
            options: options.get(facet).to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use story_core::RecordId;

    #[test]
    fn row_resolves_image_and_month() {
        let record = Record {
            id: Some(RecordId::new("7")),
            program_detail: Some("Cloud".into()),
            company_name: Some("Initech".into()),
            month: Some("2024-03-05T10:00:00Z".into()),
            image_ref: Some("abc-123".into()),
            ..Record::default()
        };
        let row = StoryRow::from_record(&record, "https://cms.example.com");
        assert_eq!(row.month, "March 2024");
        assert_eq!(
            row.image.as_deref(),
            Some("https://cms.example.com/assets/abc-123")
        );
    }

    #[test]
    fn blank_image_ref_has_no_url() {
        let record = Record {
            image_ref: Some("  ".into()),
            ..Record::default()
        };
        assert!(StoryRow::from_record(&record, "https://cms").image.is_none());
    }
}
