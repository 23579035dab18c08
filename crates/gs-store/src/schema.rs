/// Textual description of the catalogue schema, embedded in query-synthesis
/// prompts. The schema itself is external and read-only.
pub const DATABASE_SCHEMA: &str = r#"Database Schema:
================

Tables:
1. app_user (user_id, full_name, nic_no, email, phone_no, password, role, created_at, updated_at)
2. department (department_id, title, description, email, phone_no, created_at, updated_at)
3. service (service_id, department_id, title, description, created_at, updated_at)
4. document_type (doc_type_id, doc_type, description, created_at)
5. required_doc_for_service (service_id, doc_type_id, is_mandatory, created_at)
6. appointment (appointment_id, officer_id, citizen_id, service_id, timeslot_id, status, created_at, updated_at)
7. time_slot (timeslot_id, service_id, start_time, end_time, max_appointments, created_at)
8. user_document (user_doc_id, user_id, doc_type_id, file_path, upload_time, verification_status)
9. appointment_document (appointment_doc_id, appointment_id, file_path, doc_type, uploaded_date, verification_status, review)
10. feedback (feedback_id, appointment_id, rating, review, submit_time)
11. complaint (complaint_id, citizen_id, appointment_id, title, field, type, created_at)
12. notification (notification_id, appointment_id, citizen_id, type, message, send_via, send_time, created_at)
13. message (message_id, appointment_id, sender_id, receiver_id, message, send_time)
14. officer_department (officer_id, department_id, created_at)
15. user_auth (user_id, auth_user_id)

Key Relationships:
- service.department_id -> department.department_id
- required_doc_for_service.service_id -> service.service_id
- required_doc_for_service.doc_type_id -> document_type.doc_type_id
- appointment.citizen_id -> app_user.user_id
- appointment.officer_id -> app_user.user_id
- appointment.service_id -> service.service_id
"#;
