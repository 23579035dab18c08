//! Canned responses.

use gs_protocol::Intent;

use crate::classifier::ClassifierPolicy;
use crate::classifier::rules::matches_any;

pub const OFFICE_HOURS: &str = "Government Office Hours

Regular Working Hours:
• Monday - Friday: 8:30 AM - 4:30 PM
• Lunch Break: 12:00 PM - 1:00 PM
• Weekends: Closed (except emergency services)
• Public Holidays: Closed

24/7 Emergency Services:
• Police Emergency: 119
• Fire & Rescue: 110
• Government Helpline: 1919

Tip: Call ahead to confirm specific department hours as some may vary.";

pub const SERVICE_LOCATIONS: &str = "Service Locations

• Divisional Secretariats: available in every division
• District Offices: available in each district
• Provincial Offices: available in every province

Find Your Nearest Office:
• Visit www.gov.lk/locations
• Call 1919 for directions
• Search maps for \"government office near me\"

Most offices are accessible by public transport.";

pub const COMPLAINT_PROCEDURE: &str = "How to File a Complaint

Online Complaint:
• Visit www.gov.lk/complaints
• Fill out the complaint form with detailed information
• Upload any supporting documents
• Get a reference number to track your complaint

Phone Complaint:
• Call 1919 (Government Helpline)
• Provide all relevant details
• Note down the reference number given

Written Complaint:
• Submit to the relevant department office
• Include all supporting documents
• Keep copies for your records

Information to Include:
• Date and time of incident
• Department/officer involved
• Detailed description of the issue
• Your contact information
• Any supporting evidence

Follow-up: You can track your complaint status using the reference number provided.";

pub const APPOINTMENT_PROCEDURE: &str = "Appointment Booking

To schedule an appointment:
1. Choose your service (passport, license, etc.)
2. Select a preferred date and time
3. Provide the required documents
4. Confirm your appointment

Booking Methods:
• Online: www.gov.lk/appointments
• Phone: Call the relevant department
• Visit: Walk-in service centers

Business Hours: Monday - Friday, 8:30 AM - 4:30 PM

Before Your Appointment:
• Prepare all required documents
• Arrive 15 minutes early
• Bring your appointment confirmation";

pub const APPLICATION_PROCESS: &str = "General Application Process

Step-by-Step Process:
1. Check required documents for your service
2. Prepare all necessary paperwork
3. Submit your application (online or in-person)
4. Pay applicable fees
5. Receive acknowledgment receipt
6. Track your application status

Online Applications:
• Visit www.gov.lk
• Create an account or log in
• Select your required service
• Upload required documents
• Pay fees online

In-Person Applications:
• Visit the relevant department office
• Bring original documents and photocopies
• Submit application with fees
• Get receipt for tracking

Need Help?
• Call 1919 for guidance
• Visit your nearest Divisional Secretariat";

pub const STATUS_CHECK: &str = "Check Your Application Status

For security reasons, status checks require authentication. I cannot access
personal application or document status.

Online Status Check:
• Visit www.gov.lk/status
• Log in with your credentials
• Enter your application reference number

SMS Status Check:
• Send your NIC number to 1919
• Available 24/7

Phone Status Check:
• Call 1919 (Government Information Center)
• Provide your NIC number and application reference
• Available Monday - Friday, 8:30 AM - 4:30 PM

In-Person Status Check:
• Visit the department where you submitted your application
• Bring your NIC and application receipt

Tip: Keep your application reference number safe. You'll need it for all status inquiries.";

pub const PORTAL_INFO: &str = "Sri Lankan Government Services Portal

Popular Services:
• Passport applications
• Driving licenses
• Birth/Marriage certificates
• Business registrations
• Tax services
• Healthcare services

How I Can Help:
• Find required documents for services
• Guide you through processes
• Provide department contact information
• Explain service requirements

Try Asking:
• \"What documents do I need for [service]?\"
• \"How to apply for [service]?\"
• \"Contact information for [department]?\"

General Helpline: 1919
Official Website: www.gov.lk";

pub const HELP: &str = "Government Services Assistant

I'm here to help with Sri Lankan government services information.

I can help you with:
• Required documents for services
• Application processes
• Department contact information
• Office hours and locations

Try Asking Me:
• \"What documents do I need for a passport?\"
• \"Which services does the Health Department offer?\"
• \"How do I apply for a driving license?\"
• \"What are the office hours?\"

Quick Help:
• Government Helpline: 1919
• Official Website: www.gov.lk
• Emergency Services: 119 (Police), 110 (Fire)";

pub const SERVICE_PROMPT: &str = "I'd be happy to help you find the required documents for a service.

Could you please specify which service you need information about? For example:
• Passport application
• Driving license
• Birth certificate
• Marriage certificate
• Business registration
• Tax clearance certificate

Just say something like \"What documents do I need for a passport?\"";

pub const NO_RESULTS: &str = "I couldn't find specific information for your query.

Try asking about:
• \"What documents do I need for passport application?\"
• \"What services does the Health Department offer?\"
• \"Show me all available government services\"
• \"What are the requirements for driving license?\"

Need immediate help?
• Call 1919 (Government Information Center)
• Visit www.gov.lk for comprehensive information";

pub const APOLOGY: &str = "I'm sorry, I couldn't process your request at the moment.

You can try:
• Rephrasing your question in a different way
• Being more specific about what you're looking for
• Contacting our helpline at 1919 for immediate assistance

Alternative ways to get help:
• Visit your nearest Divisional Secretariat office
• Check our official website at www.gov.lk
• Call the Government Information Center at 1919";

pub const SERVICE_LOOKUP_FAILED: &str = "Unable to retrieve service information at the moment.

Alternative Options:
• Visit your nearest Divisional Secretariat
• Call 1919 (Government Information Center)
• Visit www.gov.lk

Please try again later or contact the relevant department directly.";

/// Closing block of the row renderer.
pub const CONTACT_FOOTER: &str = "Need more information?
• Call 1919 (Government Information Center)
• Visit www.gov.lk
• Contact the relevant department directly";

/// Keyword deployment catch-all.
const GENERAL_HOURS_WORDS: &[&str] = &["hours", "timing", "open", "closed"];
const LOCATION_WORDS: &[&str] = &["location", "address", "where", "find"];

/// Model deployment procedural handler.
const PROCEDURAL_HOURS_WORDS: &[&str] = &["office hours", "timing", "time"];
const COMPLAINT_WORDS: &[&str] = &["complaint", "file complaint"];
const APPLICATION_WORDS: &[&str] = &["apply", "application"];

/// Response for a service that has no record.
pub fn service_not_found(service: &str) -> String {
    format!(
        "Sorry, I couldn't find information about {service} in our database.

General Information:
You can contact the nearest Divisional Secretariat or visit www.gov.lk for comprehensive service information.

Available Services:
Try asking about: passport, driving license, birth certificate, marriage certificate, business registration, etc."
    )
}

/// Catch-all template for the keyword deployment: hours, locations, then help.
pub fn general(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    if matches_any(&lower, GENERAL_HOURS_WORDS) {
        OFFICE_HOURS
    } else if matches_any(&lower, LOCATION_WORDS) {
        SERVICE_LOCATIONS
    } else {
        HELP
    }
}

/// Procedural template for the model deployment: office hours, complaint,
/// application, then help.
pub fn procedural(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    if matches_any(&lower, PROCEDURAL_HOURS_WORDS) {
        OFFICE_HOURS
    } else if matches_any(&lower, COMPLAINT_WORDS) {
        COMPLAINT_PROCEDURE
    } else if matches_any(&lower, APPLICATION_WORDS) {
        APPLICATION_PROCESS
    } else {
        HELP
    }
}

/// Template for an intent on the canned-response path. The catch-all and
/// procedural labels pick their block the way `policy`'s deployment does.
pub fn for_intent(policy: ClassifierPolicy, intent: Intent, input: &str) -> &'static str {
    match intent {
        Intent::CheckStatus | Intent::StatusCheck => STATUS_CHECK,
        Intent::ScheduleAppointment => APPOINTMENT_PROCEDURE,
        Intent::FileComplaint => COMPLAINT_PROCEDURE,
        Intent::GeneralInfo => PORTAL_INFO,
        // The data intents never reach templating; answer them like the
        // catch-all if they do.
        Intent::General | Intent::ProceduralInfo | Intent::SqlQuery | Intent::ServiceRequirements => {
            match policy {
                ClassifierPolicy::Keyword => general(input),
                ClassifierPolicy::Model => procedural(input),
            }
        }
    }
}
