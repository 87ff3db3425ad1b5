string_enum! {
    pub enum ConsultationStatus ("status") {
        Pending => "pending",
        InProgress => "in-progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consultation {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub consultation_type: String,
    pub requirements: String,
    pub status: ConsultationStatus,
    pub submitted_at: String,
}

/// A consultation ready to be stored; every intake form normalizes into this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConsultation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub consultation_type: String,
    pub requirements: String,
}
