use std::collections::BTreeMap;
use std::str::FromStr;

use derive_more::Display;

use crate::error::Error;

pub const DEFAULT_SORT: &str = "id,asc";

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum SortDirection {
    #[display(fmt = "asc")]
    Asc,
    #[display(fmt = "desc")]
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub predicate: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(predicate: impl Into<String>, ascending: bool) -> Self {
        Sort {
            predicate: predicate.into(),
            direction: if ascending { SortDirection::Asc } else { SortDirection::Desc },
        }
    }

    pub fn ascending(&self) -> bool {
        self.direction == SortDirection::Asc
    }

    /// `sort` query values. Any predicate other than `id` gets `id` as a
    /// tiebreaker so pages stay stable.
    pub fn params(&self) -> Vec<String> {
        let mut result = vec![format!("{},{}", self.predicate, self.direction)];
        if self.predicate != "id" {
            result.push("id".to_string());
        }
        result
    }
}

impl Default for Sort {
    fn default() -> Self {
        Sort::new("id", true)
    }
}

impl FromStr for Sort {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.split(',').map(str::trim);
        let predicate = match parts.next() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(Error::Config(format!("empty sort predicate in {value:?}"))),
        };
        let direction = match parts.next() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(Error::Config(format!("unknown sort direction {other:?}")))
            }
        };

        Ok(Sort {
            predicate: predicate.to_string(),
            direction,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based on the wire.
    pub page: u32,
    pub size: u32,
    pub sort: Vec<String>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: &Sort) -> Self {
        PageRequest {
            page,
            size,
            sort: sort.params(),
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        pairs.extend(self.sort.iter().map(|s| ("sort", s.clone())));
        pairs
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: Option<u64>,
    pub links: BTreeMap<String, u32>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page {
            items: Vec::new(),
            total_count: None,
            links: BTreeMap::new(),
        }
    }
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>) -> Self {
        Page {
            items,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parses a pagination `Link` header into `rel -> page`.
///
/// `</api/photos?page=1&size=20>; rel="next",</api/photos?page=0&size=20>; rel="first"`
pub fn parse_links(header: &str) -> Result<BTreeMap<String, u32>, Error> {
    let mut links = BTreeMap::new();
    if header.trim().is_empty() {
        return Ok(links);
    }

    for section in header.split(',') {
        let mut pieces = section.split(';');
        let url = pieces
            .next()
            .map(str::trim)
            .and_then(|u| u.strip_prefix('<'))
            .and_then(|u| u.strip_suffix('>'))
            .ok_or_else(|| invalid_link(section))?;
        let rel = pieces
            .next()
            .map(str::trim)
            .and_then(|r| r.strip_prefix("rel="))
            .map(|r| r.trim_matches('"'))
            .ok_or_else(|| invalid_link(section))?;

        let page = url
            .split_once('?')
            .map(|(_, query)| query)
            .into_iter()
            .flat_map(|query| query.split('&'))
            .find_map(|pair| pair.strip_prefix("page="))
            .ok_or_else(|| invalid_link(section))?
            .parse::<u32>()
            .map_err(|_| invalid_link(section))?;

        links.insert(rel.to_string(), page);
    }

    Ok(links)
}

fn invalid_link(section: &str) -> Error {
    Error::InvalidHeader {
        name: "link",
        reason: format!("malformed section {:?}", section.trim()),
    }
}
