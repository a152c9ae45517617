pub const BLOCK_TEMPLATE: &str =
    "<div class='box wide' id=b><!-- note --><span title=\"hi\">hello</span><img src=x/><br/></div>";

pub fn make_blocks(blocks: usize) -> String {
    let mut html = String::with_capacity(BLOCK_TEMPLATE.len() * blocks);
    for _ in 0..blocks {
        html.push_str(BLOCK_TEMPLATE);
    }
    html
}

/// A script body full of near-miss closing tags and escaping spans.
pub fn make_rawtext_adversarial(bytes: usize) -> String {
    let mut body = String::with_capacity(bytes + 32);
    body.push_str("<script>");
    while body.len() < bytes {
        body.push_str("</scri<pt <!-- x --> ");
    }
    body.push_str("</script>");
    body
}
