//! Built-in validation rules.

mod by_value_parameters;
mod by_value_return;
mod instance_member;
mod visible_member;

pub use by_value_parameters::ByValueParametersRule;
pub use by_value_return::ByValueReturnRule;
pub use instance_member::InstanceMemberRule;
pub use visible_member::VisibleMemberRule;

use crate::{descriptor::MemberDescriptor, pipeline::Diagnostic};

/// A usage diagnostic located at the member's marker.
fn usage(member: &MemberDescriptor, message: String) -> Diagnostic {
    let diagnostic = Diagnostic::usage(message);
    match &member.location {
        Some(location) => diagnostic.at(location.clone()),
        None => diagnostic,
    }
}
