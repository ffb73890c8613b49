//! The five managed entities and their form/table layouts.

use crate::entity::{Capabilities, EntitySchema, FieldSpec};
use crate::table::Column;

pub static INSTITUTIONS: EntitySchema = EntitySchema {
    slug: "institutions",
    title: "Institutions",
    singular: "Institution",
    endpoint: "Institutions",
    id_field: "institutionID",
    search_field: "institutionName",
    fields: &[
        FieldSpec::text("institutionName", "Institution Name"),
        FieldSpec::email("institutionEmail", "Institution Email"),
        FieldSpec::text("institutionContact", "Institution Contact"),
        FieldSpec::text("subCounty", "Subcounty"),
        FieldSpec::text("countyID", "County"),
        FieldSpec::text("contactPerson", "Contact Person"),
        FieldSpec::text("contactNumber", "Contact Number"),
        FieldSpec::text("awardLeader", "Award Leader"),
        FieldSpec::text("stageID", "Stage ID"),
        FieldSpec::text("statusID", "Status ID"),
        FieldSpec::date("licenseStartDate", "License Start Date"),
        FieldSpec::date("licenseEndDate", "License End Date"),
        FieldSpec::text_area("notes", "Notes"),
    ],
    columns: &[
        Column::text("ID", "institutionID"),
        Column::text("Name", "institutionName"),
        Column::text("Stage", "stageID"),
        Column::text("Status", "statusID"),
        Column::text("Email", "institutionEmail"),
        Column::text("Contact", "institutionContact"),
        Column::text("Sub-County", "subCounty"),
        Column::text("County", "countyID"),
        Column::text("Contact Person", "contactPerson"),
        Column::text("Contact Number", "contactNumber"),
        Column::date("License Start", "licenseStartDate"),
        Column::date("License End", "licenseEndDate"),
        Column::text("Award Leader", "awardLeader"),
        Column::text("Notes", "notes"),
    ],
    // Edit-save has never been wired to an update endpoint for institutions.
    capabilities: Capabilities {
        update: false,
        delete: true,
    },
};

pub static PROJECTS: EntitySchema = EntitySchema {
    slug: "projects",
    title: "Projects",
    singular: "Project",
    endpoint: "Projects",
    id_field: "projectID",
    search_field: "projectName",
    fields: &[
        FieldSpec::text("projectName", "Project Name"),
        FieldSpec::text("institution", "Institution"),
        FieldSpec::text("startDate", "Start Date"),
        FieldSpec::text("endDate", "End Date"),
        FieldSpec::text("cost", "Cost"),
        FieldSpec::text("subCounty", "Sub County"),
        FieldSpec::text("county", "County"),
        FieldSpec::text("description", "Description"),
        FieldSpec::text("coordinatorName", "Coordinator's Name"),
        FieldSpec::text("notes", "Notes"),
    ],
    columns: &[
        Column::text("Project Name", "projectName"),
        Column::text("Institution", "institution"),
        Column::text("Start Date", "startDate"),
        Column::text("End Date", "endDate"),
        Column::text("Cost", "cost"),
        Column::text("Sub County", "subCounty"),
        Column::text("County", "county"),
        Column::text("Description", "description"),
        Column::text("Coordinator's Name", "coordinatorName"),
        Column::text("Notes", "notes"),
    ],
    capabilities: Capabilities {
        update: false,
        delete: false,
    },
};

pub static PARTICIPANTS: EntitySchema = EntitySchema {
    slug: "participants",
    title: "Participants",
    singular: "Participant",
    endpoint: "Participants",
    id_field: "participantID",
    search_field: "participantName",
    fields: &[
        FieldSpec::text("participantName", "Participant Name"),
        FieldSpec::text("institutionID", "Institution"),
        FieldSpec::text("gender", "Gender"),
        FieldSpec::date("dateOfBirth", "Date of Birth"),
        FieldSpec::email("email", "Email"),
        FieldSpec::text("phoneNumber", "Phone Number"),
        FieldSpec::text("awardLevel", "Award Level"),
        FieldSpec::date("enrollmentDate", "Enrollment Date"),
        FieldSpec::text_area("notes", "Notes"),
    ],
    columns: &[
        Column::text("Name", "participantName"),
        Column::text("Institution", "institutionID"),
        Column::text("Gender", "gender"),
        Column::date("Date of Birth", "dateOfBirth"),
        Column::text("Email", "email"),
        Column::text("Phone", "phoneNumber"),
        Column::text("Award Level", "awardLevel"),
        Column::date("Enrolled", "enrollmentDate"),
        Column::text("Notes", "notes"),
    ],
    capabilities: Capabilities {
        update: true,
        delete: true,
    },
};

pub static TRAININGS: EntitySchema = EntitySchema {
    slug: "trainings",
    title: "Trainings",
    singular: "Training",
    endpoint: "Trainings",
    id_field: "trainingID",
    search_field: "trainingName",
    fields: &[
        FieldSpec::text("trainingName", "Training Name"),
        FieldSpec::text("facilitator", "Facilitator"),
        FieldSpec::text("venue", "Venue"),
        FieldSpec::text("county", "County"),
        FieldSpec::date("startDate", "Start Date"),
        FieldSpec::date("endDate", "End Date"),
        FieldSpec::text("attendees", "Attendees"),
        FieldSpec::text_area("notes", "Notes"),
    ],
    columns: &[
        Column::text("Training", "trainingName"),
        Column::text("Facilitator", "facilitator"),
        Column::text("Venue", "venue"),
        Column::text("County", "county"),
        Column::date("Start Date", "startDate"),
        Column::date("End Date", "endDate"),
        Column::text("Attendees", "attendees"),
        Column::text("Notes", "notes"),
    ],
    capabilities: Capabilities {
        update: true,
        delete: true,
    },
};

pub static HELPERS: EntitySchema = EntitySchema {
    slug: "helpers",
    title: "Helpers",
    singular: "Helper",
    endpoint: "Helpers",
    id_field: "helperID",
    search_field: "helperName",
    fields: &[
        FieldSpec::text("helperName", "Helper Name"),
        FieldSpec::email("email", "Email"),
        FieldSpec::text("phoneNumber", "Phone Number"),
        FieldSpec::text("institutionID", "Institution"),
        FieldSpec::text("role", "Role"),
        FieldSpec::date("startDate", "Start Date"),
        FieldSpec::text_area("notes", "Notes"),
    ],
    columns: &[
        Column::text("Name", "helperName"),
        Column::text("Email", "email"),
        Column::text("Phone", "phoneNumber"),
        Column::text("Institution", "institutionID"),
        Column::text("Role", "role"),
        Column::date("Start Date", "startDate"),
        Column::text("Notes", "notes"),
    ],
    capabilities: Capabilities {
        update: true,
        delete: true,
    },
};

/// Every managed entity, in navigation order.
pub static ALL: [&EntitySchema; 5] = [
    &INSTITUTIONS,
    &PROJECTS,
    &PARTICIPANTS,
    &TRAININGS,
    &HELPERS,
];

/// Find an entity schema by page slug.
pub fn find(slug: &str) -> Option<&'static EntitySchema> {
    ALL.iter().copied().find(|s| s.slug == slug)
}
