use crate::error::GgError;
use crate::result::GgResult;
use anyhow::anyhow;
use reqwest::header::{HeaderMap, LINK};
use reqwest::Url;
use std::collections::HashMap;

/// Page numbers advertised by the `Link` header of a paginated response.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct PageLinks {
    pub(crate) next_page: Option<u32>,
    pub(crate) last_page: Option<u32>,
}

impl PageLinks {
    pub(crate) fn from_headers(headers: &HeaderMap) -> GgResult<Self> {
        let Some(link_header) = headers.get(LINK) else {
            return Ok(Self::default())
        };

        let links = Self::parse_link_header(
            link_header
                .to_str()
                .map_err(|e| GgError::Other(anyhow!(e)))?,
        );

        Ok(Self {
            next_page: Self::get_page_number(&links, "next")?,
            last_page: Self::get_page_number(&links, "last")?,
        })
    }

    fn parse_link_header(s: &str) -> HashMap<String, String> {
        fn parse_url_part(s: &str) -> Option<String> {
            s.strip_prefix('<')
                .and_then(|s0| s0.strip_suffix('>'))
                .map(|s1| s1.to_string())
        }

        fn parse_rel_part(s: &str) -> Option<String> {
            s.split(';')
                .map(str::trim)
                .find_map(|p| p.strip_prefix("rel=\""))
                .and_then(|s0| s0.strip_suffix('"'))
                .map(|s1| s1.to_string())
        }

        s.split(',')
            .filter_map(|part| {
                part.split_once(';').and_then(|(u, r)| {
                    parse_url_part(u.trim())
                        .and_then(|u0| parse_rel_part(r.trim()).map(|r0| (r0, u0)))
                })
            })
            .collect::<HashMap<_, _>>()
    }

    fn get_page_number(links: &HashMap<String, String>, rel: &str) -> GgResult<Option<u32>> {
        let Some(s) = links.get(rel) else {
            return Ok(None)
        };

        let url = s
            .parse::<Url>()
            .map_err(|e| GgError::Other(anyhow!(e)))?;

        let page = url
            .query_pairs()
            .find(|(n, _)| n == "page")
            .ok_or_else(|| anyhow!("page missing from {rel} link {url}"))?
            .1
            .parse::<u32>()
            .map_err(|e| GgError::Other(anyhow!(e)))?;

        Ok(Some(page))
    }
}
