//! Projection of paging settings into an instance `paging` block

use super::types::PollerPaging;
use crate::document::Document;
use crate::types::JsonObject;

/// Build the `paging` block of a polling connector instance
///
/// Returns `None` for [`PollerPaging::None`]; the caller omits the block.
/// Otherwise `pagingType` is always present and every variant field is
/// emitted only when non-empty (or non-zero for `pageSize`).
pub fn paging_document(paging: &PollerPaging) -> Option<JsonObject> {
    let doc = Document::new().field("pagingType", paging.type_name());

    let doc = match paging {
        PollerPaging::None => return None,

        PollerPaging::LinkHeader {
            next_page_request_header,
        } => doc.text_if_present("nextPageRequestHeader", next_page_request_header),

        PollerPaging::NextPageUrl {
            next_page_url,
            next_page_para_name,
        } => doc
            .text_if_present("nextPageUrl", next_page_url)
            .text_if_present("nextPageParaName", next_page_para_name),

        PollerPaging::NextPageToken {
            next_page_token_json_path,
            next_page_para_name,
        } => doc
            .text_if_present("nextPageTokenJsonPath", next_page_token_json_path)
            .text_if_present("nextPageParaName", next_page_para_name),

        PollerPaging::Offset {
            page_size,
            page_size_para_name,
        } => doc
            .number_if_nonzero("pageSize", *page_size)
            .text_if_present("pageSizeParaName", page_size_para_name),

        PollerPaging::PersistentToken {
            has_next_flag_json_path,
        }
        | PollerPaging::PersistentLink {
            has_next_flag_json_path,
        } => doc.text_if_present("hasNextFlagJsonPath", has_next_flag_json_path),
    };

    Some(doc.build())
}
