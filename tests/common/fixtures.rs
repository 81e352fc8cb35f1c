/// Wraps `body` in the document skeleton the parser synthesizes.
pub fn page(body: &str) -> String {
    format!("<html><head></head><body>{}</body></html>", body)
}

/// A shop page with a header, a product list and a footer placeholder.
pub fn shop_page(base: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Shop</title></head><body><fragment src="{base}/header">Header unavailable</fragment><main><fragment src="{base}/products"><p>No products</p></fragment></main><fragment src="{base}/footer"></fragment></body></html>"#
    )
}

pub const HEADER: &str = r#"<link rel="stylesheet" href="/header.css"><header><nav>Home</nav></header>"#;

pub const PRODUCTS: &str = r#"<link rel="stylesheet" href="/products.css"><ul><li>Tea</li><li>Coffee</li></ul><fragment src="{base}/recommendations">none</fragment>"#;

pub const RECOMMENDATIONS: &str = r#"<link rel="stylesheet" href="/recommendations.css"><aside>Try cocoa</aside>"#;
