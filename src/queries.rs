pub const ALL_PERFORMERS: &str = r#"
query {
  allPerformers {
    id
    name
    birthdate
  }
}
"#;

pub const ALL_CUSTOM_FIELDS: &str = r#"
query {
  allCustomFields {
    id
    name
    type
  }
}
"#;

pub const CUSTOM_FIELD_CREATE: &str = r#"
mutation customFieldCreate($input: CustomFieldCreateInput!) {
  customFieldCreate(input: $input) {
    id
    name
  }
}
"#;

pub const PERFORMER_UPDATE: &str = r#"
mutation performerUpdate($input: PerformerUpdateInput!) {
  performerUpdate(input: $input) {
    id
  }
}
"#;
