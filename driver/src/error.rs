use error_stack::Report;

use kernel::KernelError;

/// Lifts a driver-side failure into the kernel's error vocabulary.
pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, dotenvy::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}

impl<T> ConvertError for Result<T, std::num::ParseIntError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}
