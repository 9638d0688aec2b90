use crate::error::PublishError;
use crate::sendgrid::{DesignClient, DesignSummary, PageQuery};

/// Walk the listing endpoint until a page comes back without a continuation
/// token, keeping provider order. A failed page aborts the walk.
pub async fn fetch_all_designs(client: &dyn DesignClient, page_size: u32) -> Result<Vec<DesignSummary>, PublishError> {
    let mut designs: Vec<DesignSummary> = Vec::new();
    let mut query = PageQuery::first(page_size);
    loop {
        let page = client.list_designs(&query).await?;
        let token = page.next_page_token();
        designs.extend(page.result);
        match token {
            Some(t) => query = PageQuery::next(page_size, t),
            None => break,
        }
    }
    Ok(designs)
}

/// First design in fetch order whose name matches exactly.
pub fn find_by_name<'a>(designs: &'a [DesignSummary], name: &str) -> Option<&'a DesignSummary> {
    designs.iter().find(|d| d.name == name)
}
