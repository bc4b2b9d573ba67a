//! Response assembly
//!
//! Output order is fixed: grouped objects first, then multi-asset objects,
//! then catalog-native records. Downstream consumers rely on merged work
//! units appearing first.

use crate::domain::{DiscoveredObject, DiscoveryRequest, DiscoveryResponse, FileObject, Granule};

/// Buckets produced by classification and grouping for one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyInput {
    /// Grouped objects, or ungrouped single-asset objects when no pattern was given
    pub grouped: Vec<FileObject>,
    pub multi_asset: Vec<FileObject>,
    pub catalog_native: Vec<Granule>,
}

/// Build the response for one invocation
///
/// Echoes the request, replaces `start_after` with `next_page` (dropping it
/// when paging is exhausted), and concatenates the buckets in output order.
pub fn assemble(
    mut request: DiscoveryRequest,
    next_page: Option<u64>,
    input: AssemblyInput,
) -> DiscoveryResponse {
    request.start_after = next_page;

    let mut objects =
        Vec::with_capacity(input.grouped.len() + input.multi_asset.len() + input.catalog_native.len());
    objects.extend(input.grouped.into_iter().map(DiscoveredObject::File));
    objects.extend(input.multi_asset.into_iter().map(DiscoveredObject::File));
    objects.extend(
        input
            .catalog_native
            .into_iter()
            .map(DiscoveredObject::CatalogNative),
    );

    DiscoveryResponse { request, objects }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GranuleId, PassThrough};

    fn file(id: &str) -> FileObject {
        FileObject::new("C", GranuleId::new(id).unwrap(), PassThrough::default())
            .with_remote_fileurl(format!("s3://bucket/{id}.tif"))
    }

    #[test]
    fn test_output_order() {
        let input = AssemblyInput {
            grouped: vec![file("grouped")],
            multi_asset: vec![file("multi")],
            catalog_native: vec![Granule::new(GranuleId::new("native").unwrap(), Vec::new())],
        };

        let response = assemble(DiscoveryRequest::new("C", "1"), None, input);
        let ids: Vec<&str> = response
            .objects
            .iter()
            .map(|obj| match obj {
                DiscoveredObject::File(f) => f.granule_id.as_str(),
                DiscoveredObject::CatalogNative(g) => g.id.as_str(),
            })
            .collect();
        assert_eq!(ids, vec!["grouped", "multi", "native"]);
    }

    #[test]
    fn test_cursor_replaced() {
        let mut request = DiscoveryRequest::new("C", "1");
        request.start_after = Some(2);

        let advanced = assemble(request.clone(), Some(3), AssemblyInput::default());
        assert_eq!(advanced.next_page(), Some(3));

        let exhausted = assemble(request, None, AssemblyInput::default());
        assert_eq!(exhausted.next_page(), None);
        assert!(exhausted.objects.is_empty());
    }
}
