use serde::{Deserialize, Serialize};

/// Response of `GET /search-members`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchMembersResponse {
    pub full_search: FullSearch,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FullSearch {
    #[serde(default)]
    pub members: Vec<ListMember>,
    #[serde(default)]
    pub total_items: Option<u64>,
}

/// A list member as Mailchimp returns it. Only mapped fields are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ListMember {
    pub email_address: String,
    #[serde(default)]
    pub merge_fields: MergeFields,
    #[serde(default)]
    pub tags: Vec<MemberTag>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeFields {
    #[serde(rename = "FNAME", default)]
    pub first_name: String,
    #[serde(rename = "LNAME", default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberTag {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
}

/// A club member found by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub tags: Vec<String>,
}

impl From<ListMember> for ClubMember {
    fn from(member: ListMember) -> Self {
        Self {
            first_name: member.merge_fields.first_name,
            last_name: member.merge_fields.last_name,
            email: member.email_address,
            tags: member.tags.into_iter().map(|t| t.name).collect(),
        }
    }
}
