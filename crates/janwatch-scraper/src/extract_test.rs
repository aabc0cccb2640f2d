use super::*;

const BASE: &str = "https://shop.example.co.jp";

fn full_page() -> String {
    r#"<html><body>
        <h1 id="product-name">LEGO City 60110</h1>
        <span class="in-tax">1,980円（税込）</span>
        <a id="slideshow-01" href="/img/goods/60110.jpg"><img src="/img/goods/60110_t.jpg"></a>
        <div id="stock-status">
          <div>
            <span hidden>out of stock</span>
            <span>in stock</span>
          </div>
        </div>
        <input type="hidden" name="MAIN_SKU" value="574-871">
    </body></html>"#
        .to_owned()
}

#[test]
fn extracts_every_field_from_a_complete_page() {
    let fields = parse_product_page(&full_page(), BASE).unwrap().unwrap();
    assert_eq!(fields.name, "LEGO City 60110");
    assert_eq!(fields.price.as_deref(), Some("1980"));
    assert_eq!(
        fields.image_url.as_deref(),
        Some("https://shop.example.co.jp/img/goods/60110.jpg")
    );
    assert_eq!(fields.online_stock.as_deref(), Some("in stock"));
    assert_eq!(fields.sku.as_deref(), Some("574-871"));
    assert!(fields.warnings.is_empty());
}

#[test]
fn missing_name_element_fails_the_gate() {
    let body = r#"<html><body><span class="in-tax">1,980円</span></body></html>"#;
    assert!(parse_product_page(body, BASE).unwrap().is_none());
}

#[test]
fn hidden_price_degrades_with_a_warning() {
    let body = full_page().replace(
        r#"<span class="in-tax">"#,
        r#"<span class="in-tax" style="display: none">"#,
    );
    let fields = parse_product_page(&body, BASE).unwrap().unwrap();
    assert_eq!(fields.name, "LEGO City 60110");
    assert_eq!(fields.price, None);
    assert_eq!(fields.warnings, vec![FieldWarning::PriceUnavailable]);
}

#[test]
fn absent_price_element_degrades_with_a_warning() {
    let body = full_page().replace(r#"<span class="in-tax">1,980円（税込）</span>"#, "");
    let fields = parse_product_page(&body, BASE).unwrap().unwrap();
    assert_eq!(fields.price, None);
    assert_eq!(fields.warnings, vec![FieldWarning::PriceUnavailable]);
}

#[test]
fn absolute_image_link_is_reanchored_to_the_configured_origin() {
    let body = full_page().replace(
        r#"href="/img/goods/60110.jpg""#,
        r#"href="https://cdn.example.net/img/goods/60110.jpg""#,
    );
    let fields = parse_product_page(&body, BASE).unwrap().unwrap();
    assert_eq!(
        fields.image_url.as_deref(),
        Some("https://shop.example.co.jp/img/goods/60110.jpg")
    );
}

#[test]
fn hidden_image_anchor_degrades_with_a_warning() {
    let body = full_page().replace(
        r#"<a id="slideshow-01""#,
        r#"<a id="slideshow-01" hidden"#,
    );
    let fields = parse_product_page(&body, BASE).unwrap().unwrap();
    assert_eq!(fields.image_url, None);
    assert_eq!(fields.warnings, vec![FieldWarning::ImageUnavailable]);
}

#[test]
fn stock_label_takes_the_first_visible_child_verbatim() {
    let body = full_page().replace(
        r#"<span hidden>out of stock</span>
            <span>in stock</span>"#,
        r#"<span>ships in 1-3 days</span>
            <span>in stock</span>"#,
    );
    let fields = parse_product_page(&body, BASE).unwrap().unwrap();
    assert_eq!(fields.online_stock.as_deref(), Some("ships in 1-3 days"));
}

#[test]
fn all_hidden_stock_children_degrade_with_a_warning() {
    let body = full_page().replace(r#"<span>in stock</span>"#, r#"<span hidden>in stock</span>"#);
    let fields = parse_product_page(&body, BASE).unwrap().unwrap();
    assert_eq!(fields.online_stock, None);
    assert_eq!(fields.warnings, vec![FieldWarning::StockUnavailable]);
}

#[test]
fn hidden_stock_container_degrades_with_a_warning() {
    let body = full_page().replace(r#"<div id="stock-status">"#, r#"<div id="stock-status" style="display:none;">"#);
    let fields = parse_product_page(&body, BASE).unwrap().unwrap();
    assert_eq!(fields.online_stock, None);
    assert_eq!(fields.warnings, vec![FieldWarning::StockUnavailable]);
}

#[test]
fn missing_sku_degrades_without_failing_the_page() {
    let body = full_page().replace(r#"<input type="hidden" name="MAIN_SKU" value="574-871">"#, "");
    let fields = parse_product_page(&body, BASE).unwrap().unwrap();
    assert_eq!(fields.sku, None);
    assert_eq!(fields.warnings, vec![FieldWarning::SkuUnavailable]);
    assert_eq!(fields.name, "LEGO City 60110");
    assert_eq!(fields.price.as_deref(), Some("1980"));
}

#[test]
fn empty_sku_value_counts_as_missing() {
    let body = full_page().replace(r#"value="574-871""#, r#"value="""#);
    let fields = parse_product_page(&body, BASE).unwrap().unwrap();
    assert_eq!(fields.sku, None);
    assert_eq!(fields.warnings, vec![FieldWarning::SkuUnavailable]);
}

#[test]
fn availability_counts_are_raw_phrase_frequencies() {
    let body = r#"
        <div class="shop"><div class="status">in stock</div></div>
        <div class="shop"><div class="status">low stock</div></div>
        <div class="shop"><div class="status">in stock</div></div>
        <div class="shop"><div class="status">out of stock</div></div>
        <div class="shop"><div class="status">low stock</div></div>
        <div class="shop"><div class="status">in stock</div></div>
    "#;
    assert_eq!(count_store_availability(body), (3, 2));
}

#[test]
fn availability_counts_are_zero_on_an_unrelated_page() {
    assert_eq!(count_store_availability("<html><body>maintenance</body></html>"), (0, 0));
}
