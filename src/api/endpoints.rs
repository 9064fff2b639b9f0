// Primary backend, relative to PRIMARY_API_URL
pub const REGISTER: &str = "/users/auth/register/";
pub const LOGIN: &str = "/users/auth/login/";
pub const LOGOUT: &str = "/users/auth/logout/";
pub const EMERGENCY_CONTACT: &str = "/onboarding/emergency-contact/";
pub const POLICY: &str = "/onboarding/policy/";
pub const PERMISSIONS: &str = "/onboarding/permissions/";
pub const SOS_TRIGGER: &str = "/trigger/sos/";
pub const GPS_TRACKING: &str = "/tracking/gps/";
pub const JOURNAL: &str = "/resources/journal/";
pub const GBV_RESOURCES: &str = "/resources/gbv/";
pub const LEGAL_AID: &str = "/resources/legal-aid/";
pub const CHATBOT: &str = "/resources/chatbot/";

// Secondary backend, relative to SECONDARY_API_URL
pub const PROCESS_EMERGENCY: &str = "/process-emergency";
pub const DASHBOARD_DATA: &str = "/dashboard-data";
