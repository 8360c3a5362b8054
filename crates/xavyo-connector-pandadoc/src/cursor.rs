//! Page-number cursor carried inside the host's opaque page token.
//!
//! PandaDoc pages by number; the host expects an opaque continuation. The
//! current page number is stored as the page token of a [`Bag`] state.

use xavyo_connector::pagination::{Bag, PageState};

use crate::{PandaDocError, PandaDocResult};

/// Decoded position of a paginated traversal.
#[derive(Debug, Clone)]
pub struct PageCursor {
    bag: Bag,
    page: u32,
}

impl PageCursor {
    /// Decode `token`. An empty token, or a bag without a current state,
    /// starts a new traversal of `resource_type_id` at page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a bag produced by
    /// [`PageCursor::advance`] or its page token is not a number.
    pub fn decode(token: &str, resource_type_id: &str) -> PandaDocResult<Self> {
        let mut bag = Bag::unmarshal(token)?;
        if bag.current().is_none() {
            bag.push(PageState {
                token: String::new(),
                resource_type_id: resource_type_id.to_string(),
                resource_id: String::new(),
            });
        }

        let page = parse_page(bag.page_token())?;
        Ok(Self { bag, page })
    }

    /// Page to fetch, 1-based.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Record the upstream's next page and encode the continuation. Returns
    /// an empty string when there is no next page.
    ///
    /// # Errors
    ///
    /// Returns an error if the bag cannot be encoded.
    pub fn advance(mut self, next_page: Option<u32>) -> PandaDocResult<String> {
        let next = next_page.map(|p| p.to_string()).unwrap_or_default();
        self.bag.next(next)?;
        Ok(self.bag.marshal()?)
    }
}

fn parse_page(raw: &str) -> PandaDocResult<u32> {
    if raw.is_empty() {
        return Ok(1);
    }
    match raw.parse::<u32>() {
        Ok(0) => Ok(1),
        Ok(page) => Ok(page),
        Err(_) => Err(PandaDocError::InvalidPageNumber(raw.to_string())),
    }
}
