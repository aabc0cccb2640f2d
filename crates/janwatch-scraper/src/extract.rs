//! Product-page field extraction.
//!
//! Each field is validated independently: the product name is the hit gate
//! (no name element means the search produced no product at all, and
//! extraction stops), while price, image, online-stock label, and SKU
//! degrade to sentinels with a warning. One missing element never discards
//! an otherwise-useful row.

use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;

const NAME_SELECTOR: &str = "#product-name";
const PRICE_SELECTOR: &str = ".in-tax";
const IMAGE_SELECTOR: &str = "a#slideshow-01";
const STOCK_SELECTOR: &str = "#stock-status";
const SKU_SELECTOR: &str = r#"input[name="MAIN_SKU"]"#;

/// Status phrases counted on the per-store availability page. The count is
/// a plain substring frequency over the raw page text — the page repeats
/// one status block per store and the blocks are not structurally
/// validated.
const STORE_IN_STOCK_PHRASE: &str = "in stock";
const STORE_LOW_STOCK_PHRASE: &str = "low stock";

/// One degraded optional field. The caller republishes these as
/// Warning-severity progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWarning {
    PriceUnavailable,
    ImageUnavailable,
    StockUnavailable,
    SkuUnavailable,
}

impl FieldWarning {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::PriceUnavailable => "tax-included price is not available",
            Self::ImageUnavailable => "product image URL could not be determined",
            Self::StockUnavailable => "online stock status could not be confirmed",
            Self::SkuUnavailable => {
                "product SKU is missing; store availability cannot be fetched"
            }
        }
    }
}

/// Fields extracted from one product page. `None` means the field was
/// absent or hidden and a matching entry sits in `warnings`.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub online_stock: Option<String>,
    pub sku: Option<String>,
    pub warnings: Vec<FieldWarning>,
}

/// Parses a product page body.
///
/// Returns `Ok(None)` when the name gate fails — the page carries no
/// product-name element, so the identifier is not a hit and no other field
/// is extracted.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidSelector`] if a selector constant fails to
/// parse.
pub fn parse_product_page(
    body: &str,
    base_url: &str,
) -> Result<Option<ProductFields>, ScrapeError> {
    let document = Html::parse_document(body);

    let Some(name_element) = select_one(&document, NAME_SELECTOR)? else {
        return Ok(None);
    };
    let name = element_text(name_element);

    let mut warnings = Vec::new();

    let price = select_one(&document, PRICE_SELECTOR)?
        .filter(|element| !is_hidden(*element))
        .map(|element| clean_price(&element_text(element)));
    if price.is_none() {
        warnings.push(FieldWarning::PriceUnavailable);
    }

    let image_url = select_one(&document, IMAGE_SELECTOR)?
        .filter(|element| !is_hidden(*element))
        .and_then(|element| anchor_image_url(element, base_url));
    if image_url.is_none() {
        warnings.push(FieldWarning::ImageUnavailable);
    }

    let online_stock = select_one(&document, STOCK_SELECTOR)?
        .filter(|element| !is_hidden(*element))
        .and_then(first_visible_status);
    if online_stock.is_none() {
        warnings.push(FieldWarning::StockUnavailable);
    }

    let sku = select_one(&document, SKU_SELECTOR)?
        .and_then(|element| element.value().attr("value"))
        .map(str::to_owned)
        .filter(|value| !value.is_empty());
    if sku.is_none() {
        warnings.push(FieldWarning::SkuUnavailable);
    }

    Ok(Some(ProductFields {
        name,
        price,
        image_url,
        online_stock,
        sku,
        warnings,
    }))
}

/// Counts the two store-availability phrases in the raw availability page.
///
/// Returns `(in_stock_count, low_stock_count)`.
#[must_use]
pub fn count_store_availability(body: &str) -> (usize, usize) {
    (
        body.matches(STORE_IN_STOCK_PHRASE).count(),
        body.matches(STORE_LOW_STOCK_PHRASE).count(),
    )
}

pub(crate) fn select_one<'a>(
    document: &'a Html,
    selector: &str,
) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let parsed = Selector::parse(selector).map_err(|_| ScrapeError::InvalidSelector {
        selector: selector.to_owned(),
    })?;
    Ok(document.select(&parsed).next())
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Hidden per the legacy pages: a `hidden` attribute or an inline
/// `display:none`.
fn is_hidden(element: ElementRef<'_>) -> bool {
    if element.value().attr("hidden").is_some() {
        return true;
    }
    element
        .value()
        .attr("style")
        .is_some_and(|style| style.replace(' ', "").contains("display:none"))
}

fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// The stock container wraps one inner block whose children are the
/// candidate status labels; all but the active one are hidden. Takes the
/// first visible label's text verbatim — labels are pass-through strings,
/// never normalized.
fn first_visible_status(container: ElementRef<'_>) -> Option<String> {
    let inner = child_elements(container).next()?;
    let visible = child_elements(inner).find(|element| !is_hidden(*element))?;
    Some(element_text(visible))
}

/// Price text up to the currency marker, commas stripped:
/// `"1,980円（税込）"` → `"1980"`.
fn clean_price(text: &str) -> String {
    let text = text.split('円').next().unwrap_or(text);
    text.replace(',', "").trim().to_owned()
}

/// Resolves the slideshow anchor's link against the configured origin.
/// The legacy pages link the image relatively; an absolute link is reduced
/// to its path and re-anchored so the output always points at the
/// configured site.
fn anchor_image_url(element: ElementRef<'_>, base_url: &str) -> Option<String> {
    let href = element.value().attr("href")?;
    let base = reqwest::Url::parse(base_url).ok()?;
    let joined = base.join(href).ok()?;
    Some(format!(
        "{}{}",
        base.origin().ascii_serialization(),
        joined.path()
    ))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
