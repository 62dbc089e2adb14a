//! Role requests: anyone may submit one, only an admin decides on it.

use std::fmt;

use tracing::info;

use super::{heading, id_tag, require_all, section, Portal};
use crate::error::Result;
use crate::models::{NewRoleRequest, RequestStatus, RoleRequest, ROLE_OPTIONS};
use crate::session::AuthProvider;
use crate::storage::KeyValueBackend;
use crate::store::{collection, PortalStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRolePage {
    pub pending: Vec<RoleRequest>,
    pub approved: Vec<RoleRequest>,
    pub rejected: Vec<RoleRequest>,
    admin: bool,
}

impl RequestRolePage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<B: KeyValueBackend>(store: &PortalStore<B>, admin: bool) -> Result<Self> {
        let mut page = Self {
            pending: Vec::new(),
            approved: Vec::new(),
            rejected: Vec::new(),
            admin,
        };
        for request in store.all(collection::ROLE_REQUESTS)? {
            match request.status {
                RequestStatus::Pending => page.pending.push(request),
                RequestStatus::Approved => page.approved.push(request),
                RequestStatus::Rejected => page.rejected.push(request),
            }
        }
        Ok(page)
    }

    fn write_group(
        &self,
        f: &mut fmt::Formatter<'_>,
        status: RequestStatus,
        requests: &[RoleRequest],
        empty: &str,
    ) -> fmt::Result {
        section(f, &format!("{} ({})", status.title(), requests.len()))?;
        if requests.is_empty() {
            return writeln!(f, "  {empty}");
        }
        for request in requests {
            writeln!(
                f,
                "  {}{}: {} ({})",
                id_tag(self.admin, &request.id),
                request.name,
                request.desired_role,
                request.date.format("%d.%m.%Y")
            )?;
            writeln!(f, "    {}", request.motivation)?;
        }
        Ok(())
    }
}

impl fmt::Display for RequestRolePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Запрос роли")?;
        writeln!(f, "Подать заявку: requests submit <имя> <роль> <мотивация>")?;

        self.write_group(f, RequestStatus::Pending, &self.pending, "Нет заявок на рассмотрении")?;
        self.write_group(f, RequestStatus::Approved, &self.approved, "Нет одобренных заявок")?;
        self.write_group(f, RequestStatus::Rejected, &self.rejected, "Нет отклонённых заявок")?;

        section(f, "Доступные роли")?;
        for role in ROLE_OPTIONS {
            writeln!(f, "  • {role}")?;
        }
        Ok(())
    }
}

impl<B: KeyValueBackend, P: AuthProvider> Portal<B, P> {
    /// File a request. Open to everyone; all three fields are required.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty required field or if the store cannot
    /// be written.
    pub fn submit_request(&mut self, request: NewRoleRequest) -> Result<RoleRequest> {
        require_all(&[
            ("name", request.name.as_str()),
            ("desiredRole", request.desired_role.as_str()),
            ("motivation", request.motivation.as_str()),
        ])?;
        let request = self.store_mut().add(collection::ROLE_REQUESTS, request)?;
        info!(
            id = request.id.as_str(),
            role = request.desired_role.as_str(),
            "role request submitted"
        );
        Ok(request)
    }

    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn approve_request(&mut self, id: &str) -> Result<bool> {
        self.decide_request(id, RequestStatus::Approved)
    }

    /// # Errors
    ///
    /// Returns an error without a session or if the store cannot be written.
    pub fn reject_request(&mut self, id: &str) -> Result<bool> {
        self.decide_request(id, RequestStatus::Rejected)
    }

    fn decide_request(&mut self, id: &str, status: RequestStatus) -> Result<bool> {
        self.admin()?;
        let changed = self.store_mut().set_request_status(id, status)?;
        if changed {
            info!(id, status = %status, "role request decided");
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{admin_portal, assert_admin_required, portal};
    use super::*;

    fn draft(name: &str) -> NewRoleRequest {
        NewRoleRequest {
            name: name.to_string(),
            desired_role: ROLE_OPTIONS[0].to_string(),
            motivation: "Хочу водить поезда".to_string(),
        }
    }

    #[test]
    fn test_anyone_can_submit() {
        let mut portal = portal();
        let request = portal.submit_request(draft("Матвей")).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);

        let page = RequestRolePage::load(portal.store(), false).unwrap();
        assert_eq!(page.pending, vec![request]);
        assert!(page.approved.is_empty() && page.rejected.is_empty());
    }

    #[test]
    fn test_submit_requires_every_field() {
        let mut portal = portal();
        let mut request = draft("Матвей");
        request.motivation = "   ".to_string();
        assert!(portal.submit_request(request).unwrap_err().is_missing_field());
        assert!(portal.store().all(collection::ROLE_REQUESTS).unwrap().is_empty());
    }

    #[test]
    fn test_decisions_partition_requests() {
        let mut portal = admin_portal();
        let first = portal.submit_request(draft("Первый")).unwrap();
        let second = portal.submit_request(draft("Второй")).unwrap();
        let third = portal.submit_request(draft("Третий")).unwrap();

        assert!(portal.approve_request(&first.id).unwrap());
        assert!(portal.reject_request(&second.id).unwrap());
        assert!(!portal.approve_request("missing").unwrap());

        let page = RequestRolePage::load(portal.store(), true).unwrap();
        assert_eq!(page.approved.len(), 1);
        assert_eq!(page.rejected.len(), 1);
        assert_eq!(page.pending[0].id, third.id);

        let text = page.to_string();
        assert!(text.contains("Одобрено (1)"));
        assert!(text.contains("Отклонено (1)"));
        assert!(text.contains("На рассмотрении (1)"));
    }

    #[test]
    fn test_decisions_require_admin() {
        let mut portal = portal();
        let request = portal.submit_request(draft("Матвей")).unwrap();
        assert_admin_required(portal.approve_request(&request.id));
        assert_admin_required(portal.reject_request(&request.id));

        let page = RequestRolePage::load(portal.store(), false).unwrap();
        assert_eq!(page.pending.len(), 1);
    }

    #[test]
    fn test_empty_groups_render_placeholders() {
        let text = RequestRolePage::load(portal().store(), false)
            .unwrap()
            .to_string();
        assert!(text.contains("Нет заявок на рассмотрении"));
        assert!(text.contains("Машинист метро"));
    }
}
