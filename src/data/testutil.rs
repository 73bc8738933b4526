use std::io::Cursor;

use super::loader::read_dataset;
use super::model::AttritionDataset;

/// Six employees across two departments, parsed through the real loader so
/// tests exercise the same type guessing as production data.
pub fn tiny_dataset() -> AttritionDataset {
    let csv = "\
Age,Attrition,BusinessTravel,Department,DistanceFromHome,EnvironmentSatisfaction,Gender,JobRole,JobSatisfaction,MaritalStatus,MonthlyIncome,OverTime,PerformanceRating,TotalWorkingYears,WorkLifeBalance,YearsAtCompany
41,Yes,Travel_Rarely,Sales,1,2,Female,Sales Executive,4,Single,5993,Yes,3,8,1,6
49,No,Travel_Frequently,Research & Development,8,3,Male,Research Scientist,2,Married,5130,No,4,10,3,10
37,Yes,Travel_Rarely,Research & Development,2,4,Male,Laboratory Technician,3,Single,2090,Yes,3,7,3,0
33,No,Travel_Frequently,Sales,3,4,Female,Sales Executive,3,Married,2909,Yes,3,8,3,8
27,No,Travel_Rarely,Research & Development,2,1,Male,Laboratory Technician,2,Married,3468,No,3,6,3,2
32,No,Travel_Rarely,Sales,2,4,Male,Manager,4,Single,11994,No,3,8,2,7
";
    read_dataset(Cursor::new(csv)).expect("test dataset parses")
}
