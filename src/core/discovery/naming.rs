//! Product-id and asset-name derivation from asset URLs
//!
//! Shared by the multi-asset classifier and the single-asset grouper so both
//! name assets the same way.

use crate::domain::ProductId;

/// Characters that separate filename tokens
const SEPARATORS: [char; 3] = ['-', '_', '.'];

fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Last path segment of a URL
pub fn basename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Byte length of the longest common prefix of two strings, on a char boundary
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map(|((i, c), _)| i + c.len_utf8())
        .unwrap_or(0)
}

/// Product id shared by a set of asset filenames
///
/// Takes the longest common prefix of the basenames and cuts it back to the
/// last token boundary, so `P1_HH.tif` and `P1_HV.tif` give `P1` rather than
/// `P1_H`. A prefix with no boundary at all is kept whole. Returns `None`
/// when the basenames share nothing.
pub fn common_product_id<'a, I>(basenames: I) -> Option<ProductId>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = basenames.into_iter().collect();
    let first = *names.first()?;

    let len = names
        .iter()
        .map(|name| common_prefix_len(first, name))
        .min()
        .unwrap_or(0);
    let raw = &first[..len];

    let on_boundary = names
        .iter()
        .all(|name| name[len..].chars().next().map_or(true, is_separator));

    let candidate = if on_boundary {
        raw
    } else {
        raw.rfind(is_separator).map_or(raw, |i| &raw[..i])
    };

    let trimmed = candidate.trim_end_matches(is_separator);
    let id = if trimmed.is_empty() {
        raw.trim_end_matches(is_separator)
    } else {
        trimmed
    };

    ProductId::new(id).ok()
}

/// Asset name of a URL within a product
///
/// Everything up to and including the last occurrence of the product id is
/// stripped, along with one following separator. Falls back to the basename
/// when the product id does not occur or nothing would remain.
pub fn asset_name(url: &str, product_id: &ProductId) -> String {
    let pid = product_id.as_str();
    let rest = url
        .rfind(pid)
        .map(|i| &url[i + pid.len()..])
        .map(|rest| rest.strip_prefix(is_separator).unwrap_or(rest))
        .unwrap_or("");

    if rest.is_empty() {
        basename(url).to_string()
    } else {
        rest.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("s3://bucket/dir/file.tif"), "file.tif");
        assert_eq!(basename("file.tif"), "file.tif");
    }

    #[test]
    fn test_common_product_id_cuts_partial_token() {
        let id = common_product_id(["PRODUCT1_HH.tif", "PRODUCT1_HV.tif"]).unwrap();
        assert_eq!(id.as_str(), "PRODUCT1");
    }

    #[test]
    fn test_common_product_id_on_boundary() {
        let id = common_product_id(["uavsar_kz_001.vrt", "uavsar_kz_001.hdr", "uavsar_kz_001.bin"])
            .unwrap();
        assert_eq!(id.as_str(), "uavsar_kz_001");
    }

    #[test]
    fn test_common_product_id_without_boundary_keeps_prefix() {
        let id = common_product_id(["PRODUCTA.tif", "PRODUCTB.tif"]).unwrap();
        assert_eq!(id.as_str(), "PRODUCT");
    }

    #[test]
    fn test_common_product_id_nothing_shared() {
        assert!(common_product_id(["a.tif", "b.tif"]).is_none());
        assert!(common_product_id(Vec::<&str>::new()).is_none());
    }

    #[test]
    fn test_common_product_id_multibyte() {
        let id = common_product_id(["größe_a.tif", "größe_b.tif"]).unwrap();
        assert_eq!(id.as_str(), "größe");
    }

    #[test]
    fn test_asset_name_strips_product_and_separator() {
        assert_eq!(
            asset_name("s3://b/PRODUCT1_HH.tif", &pid("PRODUCT1")),
            "HH.tif"
        );
        assert_eq!(
            asset_name("s3://b/afrisar_dlr_X_prj", &pid("afrisar_dlr_X")),
            "prj"
        );
        assert_eq!(asset_name("s3://b/P1.hdr", &pid("P1")), "hdr");
    }

    #[test]
    fn test_asset_name_uses_last_occurrence() {
        assert_eq!(
            asset_name("s3://b/P1/P1_VV.tif", &pid("P1")),
            "VV.tif"
        );
    }

    #[test]
    fn test_asset_name_falls_back_to_basename() {
        assert_eq!(asset_name("s3://b/other.tif", &pid("P1")), "other.tif");
        assert_eq!(asset_name("s3://b/P1", &pid("P1")), "P1");
    }
}
