//! Admin GraphQL documents

const PRODUCT_FIELDS: &str = r#"
        edges {
          node {
            id
            title
            handle
            status
            totalInventory
            createdAt
            featuredImage {
              url
              altText
            }
            priceRangeV2 {
              minVariantPrice {
                amount
                currencyCode
              }
            }
          }
          cursor
        }
        pageInfo {
          hasNextPage
          hasPreviousPage
          startCursor
          endCursor
        }"#;

/// Forward page: `first/after`
pub fn products_forward() -> String {
    format!(
        "query getProducts($first: Int!, $after: String) {{\n  products(first: $first, after: $after) {{{PRODUCT_FIELDS}\n  }}\n}}"
    )
}

/// Backward page: `last/before`
pub fn products_backward() -> String {
    format!(
        "query getProducts($last: Int!, $before: String!) {{\n  products(last: $last, before: $before) {{{PRODUCT_FIELDS}\n  }}\n}}"
    )
}

pub const DEFINITIONS_QUERY: &str = r#"
query getMetafieldDefinitions($ownerType: MetafieldOwnerType!, $first: Int!) {
  metafieldDefinitions(ownerType: $ownerType, first: $first) {
    nodes {
      id
      name
      namespace
      key
      type {
        name
      }
      validations {
        name
        value
      }
    }
  }
}
"#;

pub const PRODUCT_METAFIELDS_QUERY: &str = r#"
query getProductMetafields($id: ID!, $first: Int!) {
  product(id: $id) {
    id
    title
    metafields(first: $first) {
      edges {
        node {
          id
          namespace
          key
          value
          type
        }
      }
    }
  }
}
"#;

pub const METAFIELDS_SET_MUTATION: &str = r#"
mutation metafieldsSet($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields {
      id
      namespace
      key
      value
      type
    }
    userErrors {
      field
      message
      code
    }
  }
}
"#;

pub const FILES_QUERY: &str = r#"
query getFiles($first: Int!, $after: String) {
  files(first: $first, after: $after) {
    edges {
      node {
        ... on MediaImage {
          id
          alt
          image {
            url
          }
        }
        ... on GenericFile {
          id
          alt
          url
        }
        ... on Video {
          id
          alt
          preview {
            image {
              url
            }
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_queries_differ_only_in_shape() {
        let forward = products_forward();
        let backward = products_backward();
        assert!(forward.contains("products(first: $first, after: $after)"));
        assert!(backward.contains("products(last: $last, before: $before)"));
        assert!(forward.contains("startCursor") && backward.contains("startCursor"));
        assert!(!forward.contains("$before"));
    }
}
