//! Request DTO to domain input mappers

use orgchart_core::{DepartmentChanges, EmployeeChanges, NewDepartment, NewEmployee};

use super::requests::{
    CreateDepartmentRequest, CreateEmployeeRequest, UpdateDepartmentRequest,
    UpdateEmployeeRequest,
};

// ============================================================================
// Employee Mappers
// ============================================================================

impl From<CreateEmployeeRequest> for NewEmployee {
    fn from(request: CreateEmployeeRequest) -> Self {
        Self {
            name: request.name,
            initials: request.initials,
            title: request.title,
            employee_type: request.employee_type,
            department_id: request.department_id,
            manager_id: request.manager_id,
            matrix_user_id: request.matrix_user_id,
            avatar_color: request.avatar_color,
            skills: request.skills,
            is_council_member: request.is_council_member,
            council_role: request.council_role,
            description: request.description,
        }
    }
}

impl From<UpdateEmployeeRequest> for EmployeeChanges {
    fn from(request: UpdateEmployeeRequest) -> Self {
        Self {
            name: request.name,
            initials: request.initials,
            title: request.title,
            employee_type: request.employee_type,
            department_id: request.department_id,
            manager_id: request.manager_id,
            matrix_user_id: request.matrix_user_id,
            avatar_color: request.avatar_color,
            skills: request.skills,
            is_council_member: request.is_council_member,
            council_role: request.council_role,
            description: request.description,
        }
    }
}

// ============================================================================
// Department Mappers
// ============================================================================

impl From<CreateDepartmentRequest> for NewDepartment {
    fn from(request: CreateDepartmentRequest) -> Self {
        Self {
            name: request.name,
            icon: request.icon,
            color: request.color,
            parent_department_id: request.parent_department_id,
            head_id: request.head_id,
        }
    }
}

impl From<UpdateDepartmentRequest> for DepartmentChanges {
    fn from(request: UpdateDepartmentRequest) -> Self {
        Self {
            name: request.name,
            icon: request.icon,
            color: request.color,
            parent_department_id: request.parent_department_id,
            head_id: request.head_id,
        }
    }
}
