//! Path template parsing and matching.
//!
//! # Responsibilities
//! - Parse a template such as `/products/{product_id}` into segments
//! - Match a concrete path against a parsed template
//! - Bind parameter segments to the corresponding path components
//!
//! # Design Decisions
//! - Segment count must be identical (no wildcards, no optional segments)
//! - Literal segments compare with exact, case-sensitive equality
//! - Parameter values are bound verbatim, including the empty string
//! - No regex to guarantee O(n) matching

use std::collections::HashMap;
use std::fmt;

use crate::routing::RouteError;

/// Path parameters bound by a successful match, keyed by parameter name.
pub type PathParams = HashMap<String, String>;

/// One slash-delimited component of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path component exactly.
    Literal(String),
    /// Binds the path component to the named parameter.
    Param(String),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template into literal and parameter segments.
    ///
    /// The template must start with `/`. A bare `/` is the root template and has no
    /// segments. Empty segments, malformed braces and repeated parameter names are
    /// rejected.
    pub fn parse(template: &str) -> Result<Self, RouteError> {
        if template.is_empty() {
            return Err(RouteError::EmptyTemplate);
        }

        let Some(rest) = template.strip_prefix('/') else {
            return Err(RouteError::MissingLeadingSlash(template.to_string()));
        };

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                segments.push(parse_segment(template, part)?);
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for segment in &segments {
            if let Segment::Param(name) = segment {
                if seen.contains(&name.as_str()) {
                    return Err(RouteError::DuplicateParam {
                        template: template.to_string(),
                        name: name.clone(),
                    });
                }
                seen.push(name);
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// The template text as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match a concrete path, returning the bound parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts = split_path(path);
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(text) => {
                    if text != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }

    /// Returns true if some concrete path would match both templates.
    pub fn overlaps(&self, other: &PathTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_segment(template: &str, part: &str) -> Result<Segment, RouteError> {
    if part.is_empty() {
        return Err(RouteError::EmptySegment(template.to_string()));
    }

    if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
        if name.is_empty() || name.contains(['{', '}']) {
            return Err(RouteError::InvalidSegment {
                template: template.to_string(),
                segment: part.to_string(),
            });
        }
        return Ok(Segment::Param(name.to_string()));
    }

    if part.contains(['{', '}']) {
        return Err(RouteError::InvalidSegment {
            template: template.to_string(),
            segment: part.to_string(),
        });
    }

    Ok(Segment::Literal(part.to_string()))
}

/// Split a concrete path into components using the template delimiter.
fn split_path(path: &str) -> Vec<&str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    }
}
