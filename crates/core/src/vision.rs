//! Parsing of screenshot-analysis model responses
//!
//! The vision model is prompted to answer with `TITULO:` and `DESCRICAO:`
//! lines. Models are loose about casing and accents, so the markers are
//! matched on the uppercased line and both accented and plain spellings are
//! accepted, along with the English variants.

/// Title used when the response has no recognizable title marker.
pub const DEFAULT_TITLE: &str = "Análise de screenshot";

/// Description used when the model returns an empty response.
pub const EMPTY_RESPONSE_DESCRIPTION: &str = "(O modelo não retornou uma descrição)";

const TITLE_MARKERS: [&str; 3] = ["TITULO:", "TÍTULO:", "TITLE:"];
const DESCRIPTION_MARKERS: [&str; 3] = ["DESCRICAO:", "DESCRIÇÃO:", "DESCRIPTION:"];

/// Title and description extracted from a model response.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAnalysis {
    pub title: String,
    pub description: String,
}

fn matches_marker(line: &str, markers: &[&str]) -> bool {
    let upper = line.trim().to_uppercase();
    markers.iter().any(|marker| upper.starts_with(marker))
}

/// Parse the free-text answer of the vision model into a title and a
/// description.
///
/// When no markers are found the whole response becomes the description and
/// the title falls back to [`DEFAULT_TITLE`]. The description spans from the
/// `DESCRICAO:` line to the end of the response, so multi-line descriptions
/// survive intact.
pub fn parse_analysis_response(response: &str) -> ImageAnalysis {
    let response = response.trim();

    let mut analysis = ImageAnalysis {
        title: DEFAULT_TITLE.to_string(),
        description: response.to_string(),
    };

    if response.is_empty() {
        analysis.description = EMPTY_RESPONSE_DESCRIPTION.to_string();
        return analysis;
    }

    let mut lines: Vec<String> = response.lines().map(str::to_string).collect();
    let mut description_start = None;

    for i in 0..lines.len() {
        if matches_marker(&lines[i], &TITLE_MARKERS) {
            if let Some(colon) = lines[i].find(':') {
                let rest = lines[i][colon + 1..].trim();
                if !rest.is_empty() {
                    analysis.title = rest.to_string();
                }
            }
        }

        if matches_marker(&lines[i], &DESCRIPTION_MARKERS) {
            let mut start = i;
            if let Some(colon) = lines[i].find(':') {
                let rest = lines[i][colon + 1..].trim().to_string();
                if rest.is_empty() {
                    start = i + 1;
                } else {
                    lines[i] = rest;
                }
            }
            description_start = Some(start);
            break;
        }
    }

    if let Some(start) = description_start {
        if start < lines.len() {
            analysis.description = lines[start..].join("\n").trim().to_string();
        }
    }

    analysis
}
