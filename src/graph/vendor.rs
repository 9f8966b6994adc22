//! Vendor-path disambiguation for import literals.

/// Load-paths an import literal may denote, most specific first.
///
/// For importer `a/b` and literal `c/d` this is `a/b/vendor/c/d`,
/// `a/vendor/c/d`, `vendor/c/d`, `c/d`. A relative literal (`.`, `..`,
/// `./x`, `../x`) names exactly one package, relative to the importer.
pub fn vendor_candidates(importer: &str, literal: &str) -> Vec<String> {
    if is_relative(literal) {
        return vec![join_relative(importer, literal)];
    }

    let mut candidates = Vec::new();
    let mut dir = Some(importer.trim_end_matches('/')).filter(|d| !d.is_empty());
    while let Some(d) = dir {
        candidates.push(format!("{}/vendor/{}", d, literal));
        dir = d.rsplit_once('/').map(|(head, _)| head);
    }
    candidates.push(format!("vendor/{}", literal));
    candidates.push(literal.to_string());
    candidates
}

/// First candidate of `literal` accepted by `exists`.
pub fn resolve_import(
    importer: &str,
    literal: &str,
    exists: impl Fn(&str) -> bool,
) -> Option<String> {
    vendor_candidates(importer, literal)
        .into_iter()
        .find(|c| exists(c))
}

fn is_relative(literal: &str) -> bool {
    literal == "." || literal == ".." || literal.starts_with("./") || literal.starts_with("../")
}

fn join_relative(importer: &str, literal: &str) -> String {
    let mut segments: Vec<&str> = importer.split('/').filter(|s| !s.is_empty()).collect();
    for seg in literal.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}
